//! Logging middleware for request/response tracing.
//!
//! Logs incoming requests and outgoing responses with timing information and
//! request correlation via request IDs.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Level, info, span};

use super::RequestId;

/// Middleware that logs request and response information.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    // The guard is scoped so it is never held across the await; an entered
    // span guard is not Send and would break the middleware future.
    {
        let _enter = span.enter();
        info!(
            method = %method,
            path = %uri.path(),
            request_id = %request_id,
            "Request received"
        );
    }

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    {
        let _enter = span.enter();
        info!(
            status = %response.status().as_u16(),
            duration_ms = %duration.as_millis(),
            request_id = %request_id,
            "Response sent"
        );
    }

    response
}
