//! Notification repository for async database operations.
//!
//! The notifications table is insert-only: records are written before any
//! provider call and never updated or deleted afterwards.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, NotificationRecord};

/// Notification repository
#[derive(Clone)]
pub struct NotificationRepository {
    pool: AsyncDbPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Persists one notification record.
    ///
    /// # Returns
    /// The created record with its generated id and timestamp. Two identical
    /// requests produce two distinct records: there is no deduplication.
    pub async fn create(&self, new_notification: NewNotification) -> AppResult<NotificationRecord> {
        use crate::schema::notifications::dsl::*;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        diesel::insert_into(notifications)
            .values(&new_notification)
            .returning(NotificationRecord::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
