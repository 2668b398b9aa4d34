//! Post document with embedded comments.

pub mod model;

pub use model::{Comment, Post};
