use chrono::Duration;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::TokenIssuer;

/// Issues HS256 JWTs carrying `uid`, `username`, `iat` and `exp`.
pub struct JwtTokenIssuer {
    handler: auth::JwtHandler,
}

impl JwtTokenIssuer {
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            handler: auth::JwtHandler::new(secret),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, ttl: Duration) -> Result<AccessToken, TokenError> {
        let claims = auth::Claims::for_user(user.id.value(), user.username.as_str(), ttl)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        self.handler
            .encode(&claims)
            .map(AccessToken::new)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}
