//! `JsonBody` extractor: `axum::Json` whose rejections render like every
//! other API error.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use reversevibe_core::error::AppError;

/// A JSON request body.
///
/// A missing content type, malformed JSON, or a body of the wrong shape is
/// a validation error carrying axum's description of the problem.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(rejection)
    }
}

fn rejection(err: JsonRejection) -> AppError {
    AppError::validation(err.body_text())
}
