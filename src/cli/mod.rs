//! CLI module for courier
//!
//! This module provides command-line interface functionality:
//! - Argument parsing with clap
//! - Configuration merging (CLI args over config files)

pub mod parser;

pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::{ConfigLoader, Settings};
use crate::error::AppResult;

/// Load settings and apply CLI argument overrides.
///
/// Precedence, lowest to highest: configuration files, environment
/// variables, CLI arguments.
pub fn load_settings(cli: &Cli) -> AppResult<Settings> {
    let loader = if let Some(ref path) = cli.config {
        ConfigLoader::from_file(path.clone())
    } else {
        ConfigLoader::new()?
    };

    let loader = if let Some(ref env) = cli.env {
        loader.with_environment(env.clone().into())
    } else {
        loader
    };

    let mut settings = loader.load()?;

    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    if let Some(Commands::Serve {
        host,
        port,
        log_level,
        ..
    }) = &cli.command
    {
        if let Some(host) = host {
            settings.server.host = host.clone();
        }
        if let Some(port) = port {
            settings.server.port = *port;
        }
        if let Some(level) = log_level {
            settings.logger.level = level.clone().into();
        }
    }

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_serve_overrides_take_precedence() {
        let cli = Cli::try_parse_from(["courier", "serve", "--host", "0.0.0.0", "--port", "9090"])
            .unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9090);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let cli = Cli::try_parse_from(["courier", "--verbose"]).unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let cli = Cli::try_parse_from(["courier", "--quiet"]).unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.logger.level, "error");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["courier", "--config", "/nonexistent/courier.toml", "serve"])
            .unwrap();
        assert!(load_settings(&cli).is_err());
    }
}
