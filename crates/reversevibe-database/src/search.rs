//! Case-insensitive pattern matching used by the search endpoints.

use regex::{Regex, RegexBuilder};

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;

/// Compiles a caller-supplied pattern. The pattern is used as a regular
/// expression, not escaped.
pub fn compile(pattern: &str) -> AppResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::database(format!("Invalid regular expression: {e}")))
}
