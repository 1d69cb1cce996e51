use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courier",
        description = "A notification dispatch service",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = NOTIFICATION_TAG, description = "Notification dispatch and registration endpoints"),
    )
)]
pub struct ApiDoc;
