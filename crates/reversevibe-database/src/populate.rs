//! Replaces user references inside serialized documents with projected users.

use serde_json::Value;

use reversevibe_core::result::AppResult;
use reversevibe_core::types::UserId;
use reversevibe_entity::projection;

use crate::repositories::UserRepository;

/// Replaces `document[field]` (a user id) with the listed fields of that
/// user. A dangling or malformed reference becomes `null`.
pub async fn populate_user(
    users: &UserRepository,
    document: &mut Value,
    field: &str,
    fields: &[&str],
) -> AppResult<()> {
    let Some(slot) = document.get_mut(field) else {
        return Ok(());
    };
    *slot = resolve(users, slot, fields).await?;
    Ok(())
}

/// Populates the `user` reference of every embedded comment.
pub async fn populate_comments(
    users: &UserRepository,
    document: &mut Value,
    fields: &[&str],
) -> AppResult<()> {
    if let Some(Value::Array(comments)) = document.get_mut("comments") {
        for comment in comments.iter_mut() {
            populate_user(users, comment, "user", fields).await?;
        }
    }
    Ok(())
}

async fn resolve(users: &UserRepository, reference: &Value, fields: &[&str]) -> AppResult<Value> {
    let Some(id) = reference.as_str().and_then(|s| s.parse::<UserId>().ok()) else {
        return Ok(Value::Null);
    };

    Ok(match users.find_by_id(id).await? {
        Some(user) => projection::select(&serde_json::to_value(&user)?, fields),
        None => Value::Null,
    })
}
