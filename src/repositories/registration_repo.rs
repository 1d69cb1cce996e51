//! Web-push registration repository for async database operations.
//!
//! Registrations are keyed uniquely by endpoint. Writes are upserts: the
//! latest p256dh/auth values win and no history is retained, so registering
//! the same endpoint twice is idempotent.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewWebPushRegistration, WebPushRegistration};

/// Web-push registration repository
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: AsyncDbPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts or updates a registration keyed by endpoint.
    ///
    /// # Returns
    /// The stored registration reflecting the latest values.
    pub async fn upsert(
        &self,
        registration: NewWebPushRegistration,
    ) -> AppResult<WebPushRegistration> {
        use crate::schema::webpush_registrations::dsl::*;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        diesel::insert_into(webpush_registrations)
            .values(&registration)
            .on_conflict(endpoint)
            .do_update()
            .set((
                p256dh.eq(excluded(p256dh)),
                auth.eq(excluded(auth)),
                updated_at.eq(diesel::dsl::now),
            ))
            .returning(WebPushRegistration::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
