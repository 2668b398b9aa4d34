//! Registration and login.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_entity::User;

use crate::INVALID_CREDENTIALS;
use crate::credentials::CredentialStore;
use crate::jwt::TokenCodec;

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The stored record, password hash included.
    pub user: User,
    /// Bearer token for `user`.
    pub token: String,
}

/// Issues tokens at registration and login.
///
/// There is no lockout, attempt counter, or revocation.
#[derive(Debug, Clone)]
pub struct SessionManager {
    codec: Arc<TokenCodec>,
    store: Arc<dyn CredentialStore>,
}

impl SessionManager {
    /// Creates a manager over a codec and credential store.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn CredentialStore>) -> Self {
        Self { codec, store }
    }

    /// Persists whatever fields the caller sent and issues a token.
    pub async fn register(&self, fields: Map<String, Value>) -> AppResult<AuthOutcome> {
        let user = self.store.create(fields).await?;
        let token = self.codec.encode(user.id)?;

        info!(
            user_id = %user.id,
            role = ?user.role,
            "User registered"
        );

        Ok(AuthOutcome { user, token })
    }

    /// Checks an email/password pair and issues a token.
    ///
    /// Missing fields count as a mismatch.
    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> AppResult<AuthOutcome> {
        let user = match email {
            Some(email) => self.store.find_by_email(email).await?,
            None => None,
        };
        let Some(user) = user else {
            warn!(email = ?email, "Login failed: unknown email");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        };

        let matches = match password {
            Some(password) => self.store.verify_password(&user, password).await?,
            None => false,
        };
        if !matches {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        }

        let token = self.codec.encode(user.id)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthOutcome { user, token })
    }
}
