//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, providers, and handlers.

mod dispatch;
pub mod providers;

pub use dispatch::{ChannelDelivery, DispatchOutcome, DispatchService};

use crate::config::ProvidersConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub dispatch: DispatchService,
}

impl Services {
    /// Creates a new Services instance from repositories and provider config.
    pub fn new(repos: Repositories, providers: &ProvidersConfig) -> Self {
        Self {
            dispatch: DispatchService::new(repos.notifications, repos.registrations, providers),
        }
    }
}
