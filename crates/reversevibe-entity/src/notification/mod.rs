//! Notification document and its enums.

pub mod kind;
pub mod model;

pub use kind::{NotificationKind, ReferenceModel};
pub use model::Notification;
