//! Notification dispatch API handlers.
//!
//! Provides the dispatch endpoint and web-push registration endpoint.

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{
    DispatchResponse, ErrorResponse, NotificationPayload, ProviderUrls, RegistrationResponse,
    WebPushRegistrationPayload,
};
use crate::error::{AppError, AppResult};
use crate::models::{Channel, NewNotification, NewWebPushRegistration};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{Json, extract::State};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use validator::ValidateEmail;

/// Creates notification-related routes.
///
/// Routes:
/// - POST /           - Dispatch a notification
/// - POST /webpush/register - Register a web-push subscription
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_notification))
        .routes(routes!(register_webpush))
}

/// POST /notifications/ - Dispatch a notification
///
/// Persists a record of the request, then routes it to the matching delivery
/// provider. The response reports `accepted: true` whenever persistence
/// succeeded; delivery failures are carried in the per-channel summaries, not
/// as HTTP errors. The request is not idempotent: repeating it creates a new
/// record and a new provider attempt.
#[utoipa::path(
    post,
    path = "/",
    tag = NOTIFICATION_TAG,
    request_body = NotificationPayload,
    responses(
        (status = 200, description = "Notification recorded and routed", body = DispatchResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn send_notification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NotificationPayload>,
) -> AppResult<Json<DispatchResponse>> {
    // Recipient shape depends on channel; only email has a checkable form.
    if payload.channel == Channel::Email && !payload.to.validate_email() {
        return Err(AppError::Validation {
            field: "to".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    let request = NewNotification {
        channel: payload.channel,
        target: payload.to,
        title: payload.title,
        body: payload.body,
        metadata: payload.metadata.unwrap_or_else(|| json!({})),
    };

    let outcome = state.services.dispatch.dispatch(request).await?;

    let provider_urls = ProviderUrls {
        email: state.settings.providers.email_provider_url.clone(),
        sms: state.settings.providers.sms_provider_url.clone(),
    };

    Ok(Json(DispatchResponse::from_outcome(outcome, provider_urls)))
}

/// POST /notifications/webpush/register - Register a web-push subscription
///
/// Upserts the registration keyed by endpoint URL: a repeated registration
/// for the same endpoint refreshes its keys instead of creating a duplicate,
/// so the request is idempotent.
#[utoipa::path(
    post,
    path = "/webpush/register",
    tag = NOTIFICATION_TAG,
    request_body = WebPushRegistrationPayload,
    responses(
        (status = 200, description = "Registration stored", body = RegistrationResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn register_webpush(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WebPushRegistrationPayload>,
) -> AppResult<Json<RegistrationResponse>> {
    let registration = NewWebPushRegistration {
        endpoint: payload.endpoint,
        p256dh: payload.p256dh,
        auth: payload.auth,
    };

    let stored = state.services.dispatch.register(registration).await?;

    tracing::info!(endpoint = %stored.endpoint, "Web-push registration stored");

    Ok(Json(RegistrationResponse {
        accepted: true,
        endpoint: stored.endpoint,
    }))
}
