//! Follow edge between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reversevibe_core::types::{FollowId, UserId};

/// `follower` follows `following`. Duplicates and self-follows are not prevented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    /// Primary key.
    pub id: FollowId,
    /// The user doing the following.
    pub follower: UserId,
    /// The user being followed.
    pub following: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Creates a new follow edge.
    pub fn new(follower: UserId, following: UserId) -> Self {
        Self {
            id: FollowId::new(),
            follower,
            following,
            created_at: Utc::now(),
        }
    }
}
