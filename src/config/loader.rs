//! Configuration loader for courier
//!
//! Provides the `ConfigLoader` struct that handles loading configuration from
//! multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "COURIER_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "COURIER_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "COURIER";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority (lowest to highest):
/// 1. `default.toml` - Base default configuration (optional; serde defaults apply)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `COURIER_*` environment variables
/// 5. Well-known flat deployment variables (`TWILIO_ACCOUNT_SID`, `DATABASE_URL`, ...)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from process environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader pinned to a single configuration file.
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Pin the loader to a specific environment instead of the detected one.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        apply_flat_env_overrides(&mut settings);

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            // Single file mode: the named file must exist
            self.add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // COURIER_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    /// Build layered configuration from multiple files
    fn build_layered_config(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = self.add_file_source(builder, &default_path, false)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = self.add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        self.add_file_source(builder, &local_path, false)
    }

    /// Add a file source to the config builder
    fn add_file_source(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        if path.exists() {
            Ok(builder.add_source(File::from(path).format(FileFormat::Toml)))
        } else {
            Ok(builder)
        }
    }
}

/// Overlay the flat environment variable names the original deployment used.
///
/// These take highest priority and map onto nested settings fields. All are
/// optional; an unset variable leaves the loaded value untouched.
fn apply_flat_env_overrides(settings: &mut Settings) {
    let overrides: [(&str, &mut String); 9] = [
        ("RABBITMQ_URL", &mut settings.queue.rabbitmq_url),
        ("DATABASE_URL", &mut settings.database.url),
        (
            "EMAIL_PROVIDER_URL",
            &mut settings.providers.email_provider_url,
        ),
        ("SMS_PROVIDER_URL", &mut settings.providers.sms_provider_url),
        (
            "TWILIO_ACCOUNT_SID",
            &mut settings.providers.twilio.account_sid,
        ),
        (
            "TWILIO_AUTH_TOKEN",
            &mut settings.providers.twilio.auth_token,
        ),
        (
            "TWILIO_FROM_NUMBER",
            &mut settings.providers.twilio.from_number,
        ),
        ("SENDGRID_API_KEY", &mut settings.providers.sendgrid.api_key),
        (
            "SENDGRID_FROM_EMAIL",
            &mut settings.providers.sendgrid.from_email,
        ),
    ];

    for (var, slot) in overrides {
        if let Ok(value) = std::env::var(var)
            && !value.is_empty()
        {
            *slot = value;
        }
    }
}
