//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since the pool and settings use `Arc` internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Immutable application settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and settings.
    ///
    /// Initializes all repositories and services from the provided pool.
    pub fn new(pool: AsyncDbPool, settings: Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, &settings.providers);
        Self {
            services,
            db_pool: pool,
            settings: Arc::new(settings),
        }
    }
}
