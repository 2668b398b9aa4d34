//! Response body shared by every failed request.

use serde::{Deserialize, Serialize};

/// Standard API error response body: `{ "success": false, "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl ApiErrorResponse {
    /// Builds a failure body with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
