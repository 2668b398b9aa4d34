//! User document and role.

pub mod model;
pub mod role;

pub use model::User;
pub use role::UserRole;
