//! Signed token issuance and verification.
//!
//! One static secret signs and verifies every token. The verifier trusts the
//! algorithm named in the token header instead of pinning the configured one,
//! so a token re-signed under any HMAC variant with the same secret is accepted.

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header};
use tracing::debug;

use reversevibe_core::config::AuthConfig;
use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_core::types::UserId;

use super::claims::Claims;
use crate::TOKEN_NOT_VALID;

/// Encodes and decodes bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Algorithm declared on issued tokens.
    algorithm: Algorithm,
    /// Lifetime of issued tokens.
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let algorithm = Algorithm::from_str(&config.jwt_algorithm).map_err(|e| {
            AppError::configuration(format!(
                "Unsupported JWT algorithm '{}': {e}",
                config.jwt_algorithm
            ))
        })?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::configuration(format!(
                "JWT algorithm '{}' cannot sign with a shared secret",
                config.jwt_algorithm
            )));
        }

        let ttl = Duration::from_std(config.expires_in()?)
            .map_err(|e| AppError::configuration(format!("Invalid token lifetime: {e}")))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            algorithm,
            ttl,
        })
    }

    /// Algorithm declared on issued tokens.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Issues a token for `subject`, expiring after the configured lifetime.
    pub fn encode(&self, subject: UserId) -> AppResult<String> {
        self.encode_claims(&Claims::new(subject, self.ttl), self.algorithm)
    }

    /// Signs arbitrary claims under `algorithm` with the shared secret.
    pub fn encode_claims(&self, claims: &Claims, algorithm: Algorithm) -> AppResult<String> {
        jsonwebtoken::encode(&Header::new(algorithm), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token encoding failed: {e}")))
    }

    /// Verifies a token and returns its claims.
    ///
    /// The accepted algorithm is whatever the header declares. Expiry is
    /// checked with zero leeway.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let header = decode_header(token).map_err(|e| rejected(&e))?;

        let mut validation = Validation::new(header.alg);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| rejected(&e))
    }
}

fn rejected(err: &jsonwebtoken::errors::Error) -> AppError {
    let reason = match err.kind() {
        JwtErrorKind::ExpiredSignature => "expired",
        JwtErrorKind::InvalidSignature => "bad signature",
        JwtErrorKind::InvalidAlgorithm => "algorithm does not fit key",
        JwtErrorKind::MissingRequiredClaim(_) => "missing claim",
        _ => "malformed",
    };
    debug!(reason, error = %err, "Bearer token rejected");
    AppError::invalid_token(TOKEN_NOT_VALID)
}
