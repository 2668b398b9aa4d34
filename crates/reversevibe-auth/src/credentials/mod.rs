//! The user lookups and password check consumed by the session layer.

pub mod store;

use async_trait::async_trait;
use serde_json::{Map, Value};

use reversevibe_core::result::AppResult;
use reversevibe_core::types::UserId;
use reversevibe_entity::User;

pub use store::UserCredentialStore;

/// Source of user records for authentication.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Look up a user by id. `Ok(None)` when no record exists.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Look up a user by email. `Ok(None)` when no record exists.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Compare a plaintext candidate against the record's stored password.
    async fn verify_password(&self, user: &User, candidate: &str) -> AppResult<bool>;

    /// Persist a new user built from an unrestricted field set, role included.
    async fn create(&self, fields: Map<String, Value>) -> AppResult<User>;
}
