//! Notification repository implementation.

use std::sync::Arc;

use reversevibe_core::result::AppResult;
use reversevibe_core::types::{NotificationId, UserId};
use reversevibe_entity::Notification;

use crate::store::Collection;

/// Repository for notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    notifications: Arc<Collection<Notification>>,
}

impl Default for NotificationRepository {
    fn default() -> Self {
        Self {
            notifications: Arc::new(Collection::new("Notification")),
        }
    }
}

impl NotificationRepository {
    /// Insert a notification.
    pub async fn create(&self, notification: Notification) -> AppResult<Notification> {
        Ok(self.notifications.insert(notification))
    }

    /// Find a notification by primary key.
    pub async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get(id))
    }

    /// Notifications addressed to `recipient`, newest first.
    pub async fn for_recipient(
        &self,
        recipient: UserId,
        include_admin_only: bool,
    ) -> AppResult<Vec<Notification>> {
        Ok(self
            .notifications
            .find(|n| n.recipient == recipient && (include_admin_only || !n.is_admin_only)))
    }

    /// Every admin-only notification, newest first.
    pub async fn admin_only(&self) -> AppResult<Vec<Notification>> {
        Ok(self.notifications.find(|n| n.is_admin_only))
    }

    /// Set the read flag.
    pub async fn mark_read(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.update(id, |n| n.read = true))
    }

    /// Delete a notification.
    pub async fn delete(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.remove(id))
    }

    /// Remove every notification.
    pub fn clear(&self) {
        self.notifications.clear();
    }
}
