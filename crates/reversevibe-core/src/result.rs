//! Convenience result type alias for ReverseVibe.

use crate::error::AppError;

/// A specialized `Result` type for ReverseVibe operations.
pub type AppResult<T> = Result<T, AppError>;
