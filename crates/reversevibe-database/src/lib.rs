//! # reversevibe-database
//!
//! Document persistence for ReverseVibe. Each collection is an in-process
//! concurrent map whose operations are atomic per document; repositories
//! expose the queries the HTTP layer needs.

pub mod populate;
pub mod repositories;
pub mod search;
pub mod seed;
pub mod store;

use repositories::{
    FollowRepository, MediaRepository, NotificationRepository, PostRepository, UserRepository,
};

/// Every collection, grouped.
#[derive(Debug, Clone, Default)]
pub struct Database {
    /// Users collection.
    pub users: UserRepository,
    /// Posts collection.
    pub posts: PostRepository,
    /// Follows collection.
    pub follows: FollowRepository,
    /// Notifications collection.
    pub notifications: NotificationRepository,
    /// Media collection.
    pub media: MediaRepository,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every document from every collection.
    pub fn clear(&self) {
        self.users.clear();
        self.posts.clear();
        self.follows.clear();
        self.notifications.clear();
        self.media.clear();
    }
}
