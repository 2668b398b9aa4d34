//! `CurrentSession` extractor: reads the session the route guard attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use reversevibe_auth::Session;
use reversevibe_core::error::AppError;

/// The session resolved for this request.
///
/// Only routes whose access rule runs the session resolver have one; using
/// this extractor anywhere else is a wiring mistake and yields 500.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl std::ops::Deref for CurrentSession {
    type Target = Session;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| AppError::internal("No session attached to this route"))
    }
}
