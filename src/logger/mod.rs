//! Logger module
//!
//! Initializes a `tracing-subscriber` pipeline from [`LoggerSettings`]:
//! level filtering via `EnvFilter`, console output with color control, and a
//! choice of full, compact, or JSON event formats.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::settings::LoggerSettings;

/// Initialize the global tracing subscriber from logger settings.
///
/// The level string accepts either a plain level ("debug") or a full
/// `EnvFilter` directive ("courier=debug,tower_http=warn"). Invalid
/// directives fall back to "info" rather than failing startup.
pub fn init_logger(settings: &LoggerSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&settings.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let use_ansi = settings.colored && std::io::stdout().is_terminal();

    let registry = tracing_subscriber::registry().with(filter);

    match settings.format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_target(true))
                .try_init()?;
        }
        "compact" => {
            registry
                .with(fmt::layer().compact().with_ansi(use_ansi).with_target(true))
                .try_init()?;
        }
        "full" => {
            registry
                .with(fmt::layer().with_ansi(use_ansi).with_target(true))
                .try_init()?;
        }
        other => anyhow::bail!("unknown log format: {}", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_rejected() {
        let settings = LoggerSettings {
            level: "info".to_string(),
            format: "yaml".to_string(),
            colored: false,
        };
        assert!(init_logger(&settings).is_err());
    }

    #[test]
    fn test_invalid_level_falls_back() {
        // Must not panic; the filter silently falls back to info. A second
        // init in the same process returns Err from try_init, which is fine.
        let settings = LoggerSettings {
            level: "not a level !!".to_string(),
            format: "compact".to_string(),
            colored: false,
        };
        let _ = init_logger(&settings);
    }
}
