//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use reversevibe_auth::{
    CredentialStore, PasswordHasher, SessionManager, SessionResolver, TokenCodec,
    UserCredentialStore,
};
use reversevibe_core::config::AppConfig;
use reversevibe_core::result::AppResult;
use reversevibe_database::Database;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Persistence ──────────────────────────────────────────
    /// Every document collection
    pub db: Database,

    // ── Auth ─────────────────────────────────────────────────
    /// Token encoder/decoder
    pub codec: Arc<TokenCodec>,
    /// Password hasher (Argon2)
    pub hasher: Arc<PasswordHasher>,
    /// Bearer token resolution
    pub resolver: Arc<SessionResolver>,
    /// Registration and login
    pub sessions: Arc<SessionManager>,

    /// Process start, reported by the debug endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Builds state over a fresh database with the users collection as the
    /// credential store.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let db = Database::new();
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let credentials: Arc<dyn CredentialStore> = Arc::new(UserCredentialStore::new(
            db.users.clone(),
            Arc::clone(&hasher),
        ));
        Self::assemble(config, db, hasher, credentials)
    }

    /// Builds state over an existing database and a caller-supplied
    /// credential store.
    pub fn with_credentials(
        config: AppConfig,
        db: Database,
        credentials: Arc<dyn CredentialStore>,
    ) -> AppResult<Self> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        Self::assemble(config, db, hasher, credentials)
    }

    fn assemble(
        config: AppConfig,
        db: Database,
        hasher: Arc<PasswordHasher>,
        credentials: Arc<dyn CredentialStore>,
    ) -> AppResult<Self> {
        let codec = Arc::new(TokenCodec::new(&config.auth)?);
        let resolver = Arc::new(SessionResolver::new(
            Arc::clone(&codec),
            Arc::clone(&credentials),
        ));
        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&codec),
            credentials,
        ));

        Ok(Self {
            config: Arc::new(config),
            db,
            codec,
            hasher,
            resolver,
            sessions,
            started_at: Instant::now(),
        })
    }
}
