//! Moderation handlers, open to moderators and administrators.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use tracing::info;

use reversevibe_core::error::AppError;
use reversevibe_core::types::PostId;
use reversevibe_entity::{Post, projection};

use super::with_users;
use crate::dto::request::VisibilityRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::{CurrentSession, JsonBody, parse_id};
use crate::state::AppState;

/// GET /moderation/posts
///
/// Every post, hidden ones included.
pub async fn list_all_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let posts = state.db.posts.find_all().await?;
    let posts = with_users(&state.db.users, &posts, "user", projection::USER_AUTHOR).await?;
    Ok(Json(ApiResponse::list(posts)))
}

/// PUT /moderation/posts/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<VisibilityRequest>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let id: PostId = parse_id(&id)?;
    let post = state
        .db
        .posts
        .set_hidden(id, req.is_hidden)
        .await?
        .ok_or_else(|| AppError::not_found("Post not found"))?;

    info!(
        post_id = %post.id,
        moderator = %session.subject,
        hidden = post.is_hidden,
        "Post visibility changed"
    );
    Ok(Json(ApiResponse::ok(post)))
}
