//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod follow;
pub mod media;
pub mod moderation;
pub mod notification;
pub mod post;
pub mod root;
pub mod user;

use serde::Serialize;
use serde_json::Value;

use reversevibe_core::result::AppResult;
use reversevibe_database::populate;
use reversevibe_database::repositories::UserRepository;

/// Serializes each document and replaces its `field` reference with the
/// projected user.
pub(crate) async fn with_users<T: Serialize>(
    users: &UserRepository,
    documents: &[T],
    field: &str,
    projection: &[&str],
) -> AppResult<Vec<Value>> {
    let mut out = Vec::with_capacity(documents.len());
    for document in documents {
        let mut value = serde_json::to_value(document)?;
        populate::populate_user(users, &mut value, field, projection).await?;
        out.push(value);
    }
    Ok(out)
}
