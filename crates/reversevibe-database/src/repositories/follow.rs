//! Follow repository implementation.

use std::sync::Arc;

use reversevibe_core::result::AppResult;
use reversevibe_core::types::{FollowId, UserId};
use reversevibe_entity::Follow;

use crate::store::Collection;

/// Repository for follow edges.
#[derive(Debug, Clone)]
pub struct FollowRepository {
    follows: Arc<Collection<Follow>>,
}

impl Default for FollowRepository {
    fn default() -> Self {
        Self {
            follows: Arc::new(Collection::new("Follow")),
        }
    }
}

impl FollowRepository {
    /// Insert a follow edge. Duplicates are accepted.
    pub async fn create(&self, follow: Follow) -> AppResult<Follow> {
        Ok(self.follows.insert(follow))
    }

    /// Find an edge by primary key.
    pub async fn find_by_id(&self, id: FollowId) -> AppResult<Option<Follow>> {
        Ok(self.follows.get(id))
    }

    /// Edges pointing at `user`.
    pub async fn followers_of(&self, user: UserId) -> AppResult<Vec<Follow>> {
        Ok(self.follows.find(|f| f.following == user))
    }

    /// Edges leaving `user`.
    pub async fn following_of(&self, user: UserId) -> AppResult<Vec<Follow>> {
        Ok(self.follows.find(|f| f.follower == user))
    }

    /// Delete an edge.
    pub async fn delete(&self, id: FollowId) -> AppResult<Option<Follow>> {
        Ok(self.follows.remove(id))
    }

    /// Remove every edge.
    pub fn clear(&self) {
        self.follows.clear();
    }
}
