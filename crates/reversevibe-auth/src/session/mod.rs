//! Bearer token resolution and the registration/login flow.

pub mod manager;
pub mod resolver;

pub use manager::{AuthOutcome, SessionManager};
pub use resolver::{Session, SessionResolver, bearer_token};
