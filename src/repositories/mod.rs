//! Repository layer for data access operations.

mod notification_repo;
mod registration_repo;

pub use notification_repo::NotificationRepository;
pub use registration_repo::RegistrationRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub notifications: NotificationRepository,
    pub registrations: RegistrationRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            notifications: NotificationRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool),
        }
    }
}
