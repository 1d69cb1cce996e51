//! Validating JSON extractor.
//!
//! Deserializes the request body and runs `validator` rules before the
//! handler sees the payload, so handlers only ever receive structurally valid
//! requests.

use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that rejects invalid payloads with a 400 response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
