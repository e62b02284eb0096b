use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Access token payload.
///
/// Carries the user identity and the RFC 7519 time claims. `exp` and `iat`
/// are Unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Numeric user identifier
    pub uid: i64,

    /// Username the token was issued to
    pub username: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `username` - Username
    /// * `ttl` - Time until the token expires
    ///
    /// # Returns
    /// Claims with `exp = now + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable time range
    pub fn for_user(
        uid: i64,
        username: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        Self::issued_at(Utc::now(), uid, username, ttl)
    }

    /// Create claims for a user issued at a given instant.
    pub fn issued_at(
        now: DateTime<Utc>,
        uid: i64,
        username: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("expiry out of range for ttl {}", ttl))
        })?;

        Ok(Self {
            uid,
            username: username.into(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        })
    }
}
