//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first), so request IDs exist before the logging middleware runs.
///
/// # Routes
/// - `POST /notifications/` - Dispatch a notification
/// - `POST /notifications/webpush/register` - Register a web-push subscription
/// - `GET /notifications/health` - Health report
/// - `/swagger-ui` - Interactive API documentation
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(
            "/notifications",
            handlers::notifications::notification_routes()
                .merge(handlers::health::health_routes()),
        )
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
