//! Notification type and reference target enumerations.

use serde::{Deserialize, Serialize};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone liked a post.
    Like,
    /// Someone commented on a post.
    Comment,
    /// Someone followed the recipient.
    Follow,
    /// System message.
    System,
    /// Administrative message.
    Admin,
    /// Security alert.
    Security,
}

/// Collection a notification's `reference` points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceModel {
    /// A post.
    Post,
    /// A user.
    User,
    /// A comment.
    Comment,
}
