//! Custom Axum extractors.

pub mod json;
pub mod path;
pub mod session;

pub use json::JsonBody;
pub use path::parse_id;
pub use session::CurrentSession;
