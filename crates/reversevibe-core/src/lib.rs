//! # reversevibe-core
//!
//! Core crate for ReverseVibe. Contains configuration schemas, typed
//! identifiers, the JSON error body, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ReverseVibe crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
