//! Post and comment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use reversevibe_core::types::{CommentId, PostId, UserId};

/// A post authored by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Primary key.
    pub id: PostId,
    /// Author.
    pub user: UserId,
    /// Body text, stored unsanitized.
    pub content: String,
    /// Attached media URL.
    #[serde(default)]
    pub media_url: String,
    /// Hidden posts are left out of public listings.
    #[serde(default)]
    pub is_hidden: bool,
    /// Arbitrary caller-supplied metadata.
    #[serde(default = "empty_object")]
    pub metadata: Value,
    /// Users who liked the post.
    #[serde(default)]
    pub likes: Vec<UserId>,
    /// Comments, newest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last time the document was saved through [`Post::add_comment`] or created.
    pub updated_at: DateTime<Utc>,
}

/// A comment embedded in a [`Post`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment key.
    pub id: CommentId,
    /// Commenter.
    pub user: UserId,
    /// Body text, stored unsanitized.
    #[serde(default)]
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new post owned by `user`.
    pub fn new(
        user: UserId,
        content: impl Into<String>,
        media_url: Option<String>,
        is_hidden: bool,
        metadata: Option<Value>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            user,
            content: content.into(),
            media_url: media_url.unwrap_or_default(),
            is_hidden,
            metadata: metadata.unwrap_or_else(empty_object),
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Prepends a comment and touches `updated_at`.
    pub fn add_comment(&mut self, user: UserId, content: impl Into<String>) {
        let now = Utc::now();
        self.comments.insert(
            0,
            Comment {
                id: CommentId::new(),
                user,
                content: content.into(),
                created_at: now,
            },
        );
        self.updated_at = now;
    }
}

pub(crate) fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
