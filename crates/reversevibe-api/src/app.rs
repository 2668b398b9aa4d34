//! Application builder: wires router, middleware, and state into an Axum app
//! and runs it.

use std::future::Future;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::info;

use reversevibe_core::config::AppConfig;
use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_database::seed::seed_database;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state
        .config
        .server
        .body_limit_bytes
        .max(state.config.storage.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(&state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Builds state from configuration, creates the upload directory, and seeds
/// demo data when configured to.
pub async fn prepare_state(config: AppConfig) -> AppResult<AppState> {
    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .map_err(|e| {
            AppError::storage(format!(
                "Failed to create upload dir '{}': {e}",
                config.storage.upload_dir
            ))
        })?;

    let seed = config.should_seed();
    let state = AppState::new(config)?;

    if seed {
        info!("Seeding demo data...");
        let hasher = state.hasher.clone();
        seed_database(&state.db, |password| hasher.hash_password(password)).await?;
    }

    Ok(state)
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> AppResult<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(environment = %state.config.environment, "ReverseVibe server listening on {}", addr);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
