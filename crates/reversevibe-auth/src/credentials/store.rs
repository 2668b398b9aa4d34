//! [`CredentialStore`] backed by the users collection.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_core::types::UserId;
use reversevibe_database::repositories::UserRepository;
use reversevibe_entity::User;

use super::CredentialStore;
use crate::password::PasswordHasher;

/// Credential store over [`UserRepository`], hashing passwords on create.
#[derive(Debug, Clone)]
pub struct UserCredentialStore {
    users: UserRepository,
    hasher: Arc<PasswordHasher>,
}

impl UserCredentialStore {
    /// Creates a store over the given repository and hasher.
    pub fn new(users: UserRepository, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl CredentialStore for UserCredentialStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn verify_password(&self, user: &User, candidate: &str) -> AppResult<bool> {
        match &user.password {
            Some(hash) => self.hasher.verify_password(candidate, hash),
            None => Ok(false),
        }
    }

    async fn create(&self, fields: Map<String, Value>) -> AppResult<User> {
        let mut user = User::from_fields(&fields)?;
        let plaintext = user
            .password
            .take()
            .ok_or_else(|| AppError::validation("User validation failed: password is required"))?;
        user.password = Some(self.hasher.hash_password(&plaintext)?);
        self.users.create(user).await
    }
}
