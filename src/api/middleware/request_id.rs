//! Request ID middleware for request tracing.
//!
//! Ensures every request has a unique identifier for tracing and correlation.
//! An incoming `x-request-id` header is honored; otherwise a UUID is generated.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware that ensures every request has a unique request ID.
///
/// Stores the ID in request extensions for downstream handlers and echoes it
/// on the response headers.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
