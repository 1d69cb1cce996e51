//! Error handler for converting AppError to HTTP responses.
//!
//! Implements IntoResponse for AppError with consistent status code mapping
//! and sanitized messages: internal sources never reach the wire.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let error_response = match &self {
            AppError::Validation { field, reason } => {
                ErrorResponse::new(error_to_code(&self), &format!("Validation failed: {reason}"))
                    .with_details(field)
            }
            AppError::BadRequest { message } => ErrorResponse::new(error_to_code(&self), message),
            AppError::Database { operation, .. } => ErrorResponse::new(
                error_to_code(&self),
                &format!("Database operation failed: {operation}"),
            ),
            AppError::Configuration { key, .. } => ErrorResponse::new(
                error_to_code(&self),
                &format!("Configuration error: {key}"),
            ),
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(error_to_code(&self), "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new(error_to_code(&self), "An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}
