//! # reversevibe-entity
//!
//! Document models for every ReverseVibe collection. Models carry field
//! defaults and serialize to the camelCase JSON returned by the API.

pub mod follow;
pub mod media;
pub mod notification;
pub mod post;
pub mod projection;
pub mod user;

pub use follow::Follow;
pub use media::Media;
pub use notification::{Notification, NotificationKind, ReferenceModel};
pub use post::{Comment, Post};
pub use user::{User, UserRole};
