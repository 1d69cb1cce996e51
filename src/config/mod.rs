//! Configuration management module for courier
//!
//! Provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `COURIER_*` environment variables
//! 5. Well-known flat deployment variables (`TWILIO_ACCOUNT_SID`, `DATABASE_URL`, ...)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    DatabaseConfig, ProvidersConfig, QueueConfig, SendgridConfig, ServerConfig, Settings,
    TwilioConfig,
};
