//! Data models for database operations.

mod notification;
mod registration;

pub use notification::{Channel, NewNotification, NotificationRecord};
pub use registration::{NewWebPushRegistration, WebPushRegistration};
