//! Delivery providers behind one shared send capability.
//!
//! Each provider wraps one external delivery API. All of them normalize their
//! outcome into [`DeliveryResult`], including the unconfigured case, so the
//! dispatch router can treat every channel uniformly.

mod provider;
mod sendgrid;
mod twilio;

pub use provider::{DeliveryProvider, DeliveryResult, SEND_TIMEOUT};
pub use sendgrid::SendgridProvider;
pub use twilio::TwilioProvider;
