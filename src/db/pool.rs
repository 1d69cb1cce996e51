//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL connections.

use std::time::Duration;

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Embedded diesel migrations, compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
/// Structures holding AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async database connection pool from database settings.
///
/// # Errors
///
/// Returns `AppError::Configuration` if the URL is empty and
/// `AppError::ConnectionPool` if pool construction fails.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> AppResult<AsyncDbPool> {
    if config.url.is_empty() {
        return Err(AppError::Configuration {
            key: "database.url".to_string(),
            source: anyhow::anyhow!("database URL is not set"),
        });
    }

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

    Ok(pool)
}

/// Runs pending embedded migrations over a blocking connection.
///
/// Migrations are a startup-time concern, so the short-lived synchronous
/// connection here is acceptable; request handling always goes through the
/// async pool.
pub fn run_pending_migrations(database_url: &str) -> AppResult<()> {
    let mut conn = diesel::PgConnection::establish(database_url).map_err(|e| {
        AppError::Database {
            operation: "connect for migrations".to_string(),
            source: anyhow::Error::from(e),
        }
    })?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| AppError::Database {
            operation: "run migrations".to_string(),
            source: anyhow::anyhow!(e.to_string()),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_url_is_configuration_error() {
        let config = DatabaseConfig::default();
        let result = establish_async_connection_pool(&config).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
