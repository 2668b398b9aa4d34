//! Request DTOs.
//!
//! Every field is optional so that a missing value reaches the handler and
//! produces the same error message as any other validation failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use reversevibe_entity::{NotificationKind, ReferenceModel};

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Search query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Pattern, used as a case-insensitive regular expression.
    pub query: Option<String>,
}

/// Create post request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub is_hidden: Option<bool>,
    pub metadata: Option<Value>,
}

/// Add comment request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: Option<String>,
}

/// Follow request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    /// Id of the user to follow.
    pub user_id: Option<String>,
}

/// Create notification request. The sender is always the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub recipient: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
    pub message: Option<String>,
    pub reference: Option<String>,
    pub reference_model: Option<ReferenceModel>,
    pub is_admin_only: Option<bool>,
    pub metadata: Option<Value>,
}

/// Post visibility change, used by moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub is_hidden: bool,
}
