//! Resolves an `Authorization` header into the caller's identity.

use std::sync::Arc;

use tracing::{debug, error};

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_core::types::UserId;
use reversevibe_entity::User;

use crate::NOT_AUTHORIZED;
use crate::credentials::CredentialStore;
use crate::jwt::TokenCodec;

/// Identity attached to a request after a token was accepted.
#[derive(Debug, Clone)]
pub struct Session {
    /// Subject named by the token.
    pub subject: UserId,
    /// The user record found for the subject, without its password.
    /// `None` when the record no longer exists.
    pub identity: Option<User>,
}

impl Session {
    /// The resolved user, if any.
    pub fn identity(&self) -> Option<&User> {
        self.identity.as_ref()
    }

    /// The resolved user, or an internal error when the record is gone.
    pub fn user(&self) -> AppResult<&User> {
        self.identity.as_ref().ok_or_else(|| {
            AppError::internal(format!(
                "Authenticated user {} no longer exists",
                self.subject
            ))
        })
    }
}

/// Extracts the token from a `Bearer <token>` header value.
///
/// The value must begin with `Bearer`; the token is the second
/// space-separated segment and must be non-empty.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    let value = authorization?;
    if !value.starts_with("Bearer") {
        return None;
    }
    value.split(' ').nth(1).filter(|token| !token.is_empty())
}

/// The authenticate step.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    codec: Arc<TokenCodec>,
    store: Arc<dyn CredentialStore>,
}

impl SessionResolver {
    /// Creates a resolver over a codec and credential store.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn CredentialStore>) -> Self {
        Self { codec, store }
    }

    /// Resolves the raw `Authorization` header value.
    ///
    /// - no usable bearer token: `Unauthenticated`
    /// - token fails verification: `InvalidToken`
    /// - store lookup fails: `Internal`, carrying the store's message
    ///
    /// A missing user record is not an error; the session simply has no identity.
    pub async fn authenticate(&self, authorization: Option<&str>) -> AppResult<Session> {
        let token = bearer_token(authorization)
            .ok_or_else(|| AppError::unauthenticated(NOT_AUTHORIZED))?;

        let claims = self.codec.decode(token)?;
        let subject = claims.subject();

        let identity = self.store.find_by_id(subject).await.map_err(|e| {
            error!(user_id = %subject, error = %e, "Credential store lookup failed");
            AppError::internal(e.message)
        })?;

        debug!(
            user_id = %subject,
            found = identity.is_some(),
            "Bearer token resolved"
        );

        Ok(Session {
            subject,
            identity: identity.map(User::without_password),
        })
    }
}
