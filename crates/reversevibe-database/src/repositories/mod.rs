//! Repository implementations, one per collection.

pub mod follow;
pub mod media;
pub mod notification;
pub mod post;
pub mod user;

pub use follow::FollowRepository;
pub use media::MediaRepository;
pub use notification::NotificationRepository;
pub use post::PostRepository;
pub use user::UserRepository;
