//! Auth handlers: register and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Map, Value, json};

use reversevibe_auth::AuthOutcome;
use reversevibe_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /auth/register
///
/// The whole body is handed to the store, so any user field may be set here.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), AppError> {
    let outcome = state.sessions.register(fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payload(outcome)?))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let outcome = state
        .sessions
        .login(req.email.as_deref(), req.password.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(payload(outcome)?)))
}

fn payload(outcome: AuthOutcome) -> Result<Value, AppError> {
    Ok(json!({
        "user": serde_json::to_value(&outcome.user)?,
        "token": outcome.token,
    }))
}
