//! Follow handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

use reversevibe_core::error::AppError;
use reversevibe_core::types::{FollowId, UserId};
use reversevibe_entity::{Follow, projection};

use super::with_users;
use crate::dto::request::FollowRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::{CurrentSession, JsonBody, parse_id};
use crate::state::AppState;

/// POST /follow
///
/// Duplicate follows and self-follows are stored like any other.
pub async fn follow_user(
    State(state): State<AppState>,
    session: CurrentSession,
    JsonBody(req): JsonBody<FollowRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Follow>>), AppError> {
    let follower = session.user()?.id;
    let target = match req.user_id.as_deref() {
        Some(id) => state.db.users.find_by_id(parse_id(id)?).await?,
        None => None,
    }
    .ok_or_else(|| AppError::not_found("User not found"))?;

    let follow = state
        .db
        .follows
        .create(Follow::new(follower, target.id))
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(follow))))
}

/// DELETE /follow/{id}
pub async fn unfollow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: FollowId = parse_id(&id)?;
    state
        .db
        .follows
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found("Follow relationship not found"))?;
    Ok(Json(ApiResponse::empty()))
}

/// GET /follow/followers
pub async fn my_followers(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    followers(&state, session.user()?.id).await
}

/// GET /follow/following
pub async fn my_following(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    following(&state, session.user()?.id).await
}

/// GET /follow/followers/{userId}
pub async fn followers_of(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    followers(&state, parse_id(&user_id)?).await
}

/// GET /follow/following/{userId}
pub async fn following_of(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    following(&state, parse_id(&user_id)?).await
}

async fn followers(state: &AppState, user: UserId) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let follows = state.db.follows.followers_of(user).await?;
    let follows =
        with_users(&state.db.users, &follows, "follower", projection::USER_CONTACT).await?;
    Ok(Json(ApiResponse::list(follows)))
}

async fn following(state: &AppState, user: UserId) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let follows = state.db.follows.following_of(user).await?;
    let follows =
        with_users(&state.db.users, &follows, "following", projection::USER_CONTACT).await?;
    Ok(Json(ApiResponse::list(follows)))
}
