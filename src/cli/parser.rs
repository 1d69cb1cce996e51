//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// A notification dispatch service
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(about = "A notification dispatch service")]
#[command(long_about = "
Courier accepts notification requests over HTTP, records them, and routes
them to the matching delivery provider (Twilio for SMS, SendGrid for email).
Web-push subscriptions can be registered for later delivery by other systems.

EXAMPLES:
    # Start the server with default configuration
    courier serve

    # Start server on custom host and port
    courier serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    courier --config /path/to/config.toml serve

    # Check configuration without starting server
    courier serve --dry-run

    # Run database migrations
    courier migrate
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the layered
    /// default files. The file must exist and be valid TOML.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Force the application to use a specific environment configuration
    /// instead of reading COURIER_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Launches the HTTP server with the configured settings.
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from any interface.
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Performs a complete configuration validation check without
        /// starting the server. Returns exit code 0 if valid.
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Connects to the configured database and applies pending schema
    /// migrations.
    Migrate {
        /// Show pending migrations without applying
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["courier"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli =
            Cli::try_parse_from(["courier", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        if let Some(Commands::Serve {
            host,
            port,
            log_level: _,
            dry_run,
        }) = cli.command
        {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(8080));
            assert!(!dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["courier", "migrate", "--dry-run"]).unwrap();
        if let Some(Commands::Migrate { dry_run }) = cli.command {
            assert!(dry_run);
        } else {
            panic!("Expected Migrate command");
        }
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["courier", "--verbose", "--quiet"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["courier", "--env", "prod"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));
    }
}
