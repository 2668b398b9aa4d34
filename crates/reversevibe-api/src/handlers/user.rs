//! User handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Map, Value};

use reversevibe_core::error::AppError;
use reversevibe_core::types::UserId;
use reversevibe_entity::projection;

use crate::dto::request::SearchQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::{JsonBody, parse_id};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let users = state
        .db
        .users
        .find_all()
        .await?
        .iter()
        .map(|u| serde_json::to_value(u).map(|v| projection::select(&v, projection::USER_PROFILE)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(ApiResponse::list(users)))
}

/// GET /users/search?query=
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let pattern = params.query.unwrap_or_default();
    let users = state
        .db
        .users
        .search(&pattern)
        .await?
        .into_iter()
        .map(|u| serde_json::to_value(u.without_password()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(ApiResponse::list(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: UserId = parse_id(&id)?;
    let user = state
        .db
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let user = projection::select(&serde_json::to_value(&user)?, projection::USER_PROFILE);
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /users/{id}
///
/// Merges the body into any user record. Nothing is filtered: role and
/// password are written as sent.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: UserId = parse_id(&id)?;
    let user = state
        .db
        .users
        .update_fields(id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(ApiResponse::ok(serde_json::to_value(
        user.without_password(),
    )?)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: UserId = parse_id(&id)?;
    state
        .db
        .users
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(ApiResponse::empty()))
}
