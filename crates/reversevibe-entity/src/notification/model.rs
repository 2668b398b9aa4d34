//! Notification model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use reversevibe_core::types::{NotificationId, UserId};

use super::kind::{NotificationKind, ReferenceModel};

/// A message delivered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Primary key.
    pub id: NotificationId,
    /// Who receives it.
    pub recipient: UserId,
    /// Who sent it.
    pub sender: UserId,
    /// Notification type.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Related document.
    #[serde(default)]
    pub reference: Option<Uuid>,
    /// Collection `reference` points into.
    #[serde(default)]
    pub reference_model: Option<ReferenceModel>,
    /// Text body.
    pub message: String,
    /// Meant for moderators and administrators only.
    #[serde(default)]
    pub is_admin_only: bool,
    /// Arbitrary metadata.
    #[serde(default = "crate::post::model::empty_object")]
    pub metadata: Value,
    /// Read flag.
    #[serde(default)]
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
