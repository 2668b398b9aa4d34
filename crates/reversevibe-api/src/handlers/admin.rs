//! Admin handlers.
//!
//! Most routes here sit behind the administrator gate. The debug and
//! challenge endpoints only require a session and decide what to reveal
//! from the caller's role.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, Uri};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use reversevibe_core::error::AppError;
use reversevibe_core::types::{PostId, UserId};
use reversevibe_entity::{User, UserRole, projection};

use super::with_users;
use crate::dto::response::ApiResponse;
use crate::extractors::{CurrentSession, parse_id};
use crate::state::AppState;

const DEBUG_FLAG: &str = "CTF{d3bug_3ndp01nt_vuln3r4bl3}";
const LOG_FLAG: &str = "CTF{l0g_3xp0sur3_vuln}";
const CHALLENGE_FLAG: &str = "CTF{h1dd3n_3ndp01nt_f0und}";

/// GET /admin/users
///
/// Full records, password hashes included.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    Ok(Json(ApiResponse::list(state.db.users.find_all().await?)))
}

/// DELETE /admin/users/{id}
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

/// GET /admin/posts
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let posts = state.db.posts.find_all().await?;
    let posts = with_users(&state.db.users, &posts, "user", projection::USER_AUTHOR).await?;
    Ok(Json(ApiResponse::list(posts)))
}

/// DELETE /admin/posts/{id}
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
        .ok_or_else(|| AppError::not_found("Post not found"))?;
    Ok(Json(ApiResponse::empty()))
}

/// GET /admin/media
pub async fn list_media(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let media = state.db.media.find_all().await?;
    let media = with_users(&state.db.users, &media, "user", projection::USER_AUTHOR).await?;
    Ok(Json(ApiResponse::list(media)))
}

/// GET /admin/logs
pub async fn logs() -> Json<ApiResponse<Vec<Value>>> {
    let now = Utc::now();
    Json(ApiResponse::list(vec![
        json!({
            "timestamp": now,
            "level": "INFO",
            "message": "System started",
        }),
        json!({
            "timestamp": now - Duration::hours(1),
            "level": "ERROR",
            "message": "Database connection failed",
            "details": format!("Connection string contains flag: {LOG_FLAG}"),
        }),
        json!({
            "timestamp": now - Duration::hours(2),
            "level": "WARN",
            "message": "Failed login attempt",
            "user": "admin@reversevibe.com",
            "ip": "192.168.1.1",
        }),
    ]))
}

/// GET /admin/debug
///
/// Open to every authenticated caller. Only `secretFlag` depends on the role;
/// everything else, signing secret included, is returned to anyone.
pub async fn debug(
    State(state): State<AppState>,
    session: CurrentSession,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Json<ApiResponse<Value>> {
    let is_admin = session
        .identity()
        .is_some_and(|user| user.role == Some(UserRole::Admin));
    let config = &state.config;
    let secret_flag = if is_admin {
        DEBUG_FLAG
    } else {
        "You need admin access to see this flag"
    };

    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Json(ApiResponse::ok(json!({
        "system": {
            "environment": config.environment,
            "platform": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": state.started_at.elapsed().as_secs_f64(),
            "secretFlag": secret_flag,
            "jwtSecret": config.auth.jwt_secret,
            "databaseUri": config.database.uri,
            "adminEmails": ["admin@reversevibe.com", "superadmin@reversevibe.com"],
        },
        "request": {
            "headers": headers,
            "originalUrl": uri.to_string(),
            "method": method.as_str(),
        },
    })))
}

/// GET /admin/challenges/secret
pub async fn secret_challenge(session: CurrentSession) -> Json<Value> {
    let elevated = session.identity().is_some_and(User::is_staff);
    if elevated {
        Json(json!({
            "success": true,
            "message": "Congratulations on finding this hidden endpoint and gaining elevated privileges!",
            "flag": CHALLENGE_FLAG,
        }))
    } else {
        Json(json!({
            "success": true,
            "message": "You found the hidden endpoint, but you need higher privileges to see the flag.",
            "hint": "Try to find a way to become an admin or moderator.",
        }))
    }
}
