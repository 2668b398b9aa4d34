//! Post repository implementation.

use std::sync::Arc;

use serde_json::{Map, Value};

use reversevibe_core::result::AppResult;
use reversevibe_core::types::{PostId, UserId};
use reversevibe_entity::Post;

use crate::search;
use crate::store::Collection;

/// Repository for posts and their embedded comments.
#[derive(Debug, Clone)]
pub struct PostRepository {
    posts: Arc<Collection<Post>>,
}

impl Default for PostRepository {
    fn default() -> Self {
        Self {
            posts: Arc::new(Collection::new("Post")),
        }
    }
}

impl PostRepository {
    /// Find a post by primary key, hidden or not.
    pub async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>> {
        Ok(self.posts.get(id))
    }

    /// Every post, hidden included, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Post>> {
        Ok(self.posts.find(|_| true))
    }

    /// Non-hidden posts, newest first.
    pub async fn find_visible(&self) -> AppResult<Vec<Post>> {
        Ok(self.posts.find(|p| !p.is_hidden))
    }

    /// Non-hidden posts whose content matches `pattern`.
    pub async fn search_visible(&self, pattern: &str) -> AppResult<Vec<Post>> {
        let re = search::compile(pattern)?;
        Ok(self.posts.find(|p| !p.is_hidden && re.is_match(&p.content)))
    }

    /// Insert a new post.
    pub async fn create(&self, post: Post) -> AppResult<Post> {
        Ok(self.posts.insert(post))
    }

    /// Overlay caller-supplied fields onto a post. `updatedAt` is left as is.
    pub async fn update_fields(
        &self,
        id: PostId,
        fields: &Map<String, Value>,
    ) -> AppResult<Option<Post>> {
        self.posts.patch(id, fields)
    }

    /// Set the hidden flag.
    pub async fn set_hidden(&self, id: PostId, hidden: bool) -> AppResult<Option<Post>> {
        Ok(self.posts.update(id, |p| p.is_hidden = hidden))
    }

    /// Prepend a comment.
    pub async fn add_comment(
        &self,
        id: PostId,
        user: UserId,
        content: String,
    ) -> AppResult<Option<Post>> {
        Ok(self.posts.update(id, |p| p.add_comment(user, content)))
    }

    /// Delete a post.
    pub async fn delete(&self, id: PostId) -> AppResult<Option<Post>> {
        Ok(self.posts.remove(id))
    }

    /// Remove every post.
    pub fn clear(&self) {
        self.posts.clear();
    }
}
