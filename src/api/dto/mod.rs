//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `notification` - Dispatch and registration request/response DTOs
//! - `health` - Health payload
//! - `error` - Common error response DTOs

mod error;
mod health;
mod notification;

pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use notification::{
    DispatchResponse, NotificationPayload, ProviderUrls, RegistrationResponse,
    WebPushRegistrationPayload,
};
