//! Health check endpoint handler.
//!
//! Reports collaborator endpoints and provider configuration state. The
//! provider flags come from startup configuration; no connectivity probe is
//! performed, so the endpoint answers even when every collaborator is down.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::HealthResponse;
use crate::state::AppState;
use axum::{extract::State, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// GET /notifications/health - Service health report
///
/// Always returns 200 with `status: "ok"` when the process can answer at all.
/// The `rabbitmq` and `database` fields echo configured URLs; the
/// `*_configured` flags reflect credential presence only.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: state.settings.application.name.clone(),
        status: "ok".to_string(),
        rabbitmq: state.settings.queue.rabbitmq_url.clone(),
        database: state.settings.database.url.clone(),
        twilio_configured: state.services.dispatch.sms_configured(),
        sendgrid_configured: state.services.dispatch.email_configured(),
    })
}
