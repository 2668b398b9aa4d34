//! Claims carried by every bearer token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use reversevibe_core::types::UserId;

/// Token payload. The role is deliberately absent: it is looked up again
/// on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user id.
    pub id: UserId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Claims for `subject`, valid for `ttl` from now. Saturates at the
    /// latest representable time.
    pub fn new(subject: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id: subject,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        }
    }

    /// Returns the subject.
    pub fn subject(&self) -> UserId {
        self.id
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
