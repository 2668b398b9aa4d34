//! Root and fallback handlers.

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

use reversevibe_core::types::ApiErrorResponse;

/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Welcome to ReverseVibe API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Any unmatched route.
pub async fn not_found() -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("Route not found")),
    )
}
