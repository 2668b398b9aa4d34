//! Post handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use serde_json::{Map, Value};

use reversevibe_core::error::AppError;
use reversevibe_core::types::PostId;
use reversevibe_database::populate;
use reversevibe_entity::{Post, projection};

use super::with_users;
use crate::dto::request::{CommentRequest, CreatePostRequest, SearchQuery};
use crate::dto::response::ApiResponse;
use crate::extractors::{CurrentSession, JsonBody, parse_id};
use crate::state::AppState;

const POST_NOT_FOUND: &str = "Post not found";

/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let posts = state.db.posts.find_visible().await?;
    let posts = with_users(&state.db.users, &posts, "user", projection::USER_AUTHOR).await?;
    Ok(Json(ApiResponse::list(posts)))
}

/// GET /posts/search?query=
pub async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let pattern = params.query.unwrap_or_default();
    let posts = state.db.posts.search_visible(&pattern).await?;
    let posts = with_users(&state.db.users, &posts, "user", projection::USER_AUTHOR).await?;
    Ok(Json(ApiResponse::list(posts)))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    session: CurrentSession,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), AppError> {
    let author = session.user()?.id;
    let content = req
        .content
        .ok_or_else(|| AppError::validation("Post validation failed: content is required"))?;

    let post = state
        .db
        .posts
        .create(Post::new(
            author,
            content,
            req.media_url,
            req.is_hidden.unwrap_or(false),
            req.metadata,
        ))
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

/// GET /posts/{id}
///
/// A hidden post is shown to any request whose `Authorization` header starts
/// with `Bearer`. The token itself is not checked.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: PostId = parse_id(&id)?;
    let post = state
        .db
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;

    if post.is_hidden && !claims_bearer(&headers) {
        return Err(AppError::not_found(POST_NOT_FOUND));
    }

    let mut post = serde_json::to_value(&post)?;
    populate::populate_user(&state.db.users, &mut post, "user", projection::USER_AUTHOR).await?;
    populate::populate_comments(&state.db.users, &mut post, projection::USER_AUTHOR).await?;
    Ok(Json(ApiResponse::ok(post)))
}

fn claims_bearer(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer"))
}

/// PUT /posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let id: PostId = parse_id(&id)?;
    let post = state
        .db
        .posts
        .update_fields(id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: PostId = parse_id(&id)?;
    state
        .db
        .posts
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;
    Ok(Json(ApiResponse::empty()))
}

/// POST /posts/{id}/comment
pub async fn add_comment(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), AppError> {
    let id: PostId = parse_id(&id)?;
    let author = session.user()?.id;
    let content = req
        .content
        .ok_or_else(|| AppError::validation("Post validation failed: comment content is required"))?;

    let post = state
        .db
        .posts
        .add_comment(id, author, content)
        .await?
        .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}
