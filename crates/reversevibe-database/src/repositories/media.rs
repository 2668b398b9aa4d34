//! Media repository implementation.

use std::sync::Arc;

use reversevibe_core::result::AppResult;
use reversevibe_core::types::{MediaId, UserId};
use reversevibe_entity::Media;

use crate::store::Collection;

/// Repository for uploaded media records.
#[derive(Debug, Clone)]
pub struct MediaRepository {
    media: Arc<Collection<Media>>,
}

impl Default for MediaRepository {
    fn default() -> Self {
        Self {
            media: Arc::new(Collection::new("Media")),
        }
    }
}

impl MediaRepository {
    /// Insert a media record.
    pub async fn create(&self, media: Media) -> AppResult<Media> {
        Ok(self.media.insert(media))
    }

    /// Find a media record by primary key.
    pub async fn find_by_id(&self, id: MediaId) -> AppResult<Option<Media>> {
        Ok(self.media.get(id))
    }

    /// Records uploaded by `user`, newest first.
    pub async fn for_user(&self, user: UserId) -> AppResult<Vec<Media>> {
        Ok(self.media.find(|m| m.user == user))
    }

    /// Every record, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Media>> {
        Ok(self.media.find(|_| true))
    }

    /// Delete a record.
    pub async fn delete(&self, id: MediaId) -> AppResult<Option<Media>> {
        Ok(self.media.remove(id))
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.media.clear();
    }
}
