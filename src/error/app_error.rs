use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Provider-side delivery failures are deliberately NOT represented here: a
/// rejected or timed-out provider call is normal data, captured in a
/// `DeliveryResult`. `AppError` covers request validation, persistence, and
/// configuration faults only.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        AppError::Database {
            operation: "database operation".to_string(),
            source: anyhow::Error::from(error),
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(error: crate::config::ConfigError) -> Self {
        AppError::Configuration {
            key: "settings".to_string(),
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface the first field error; the full set is rarely useful to callers.
        let (field, reason) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), reason)
            })
            .unwrap_or_else(|| ("body".to_string(), "invalid request body".to_string()));

        AppError::Validation { field, reason }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
