use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;

/// Issues and validates signed session tokens.
///
/// Wraps a [`JwtHandler`] keyed with the application secret and a fixed
/// session lifetime. The same key signs any other short-lived payload the
/// web layer needs to round-trip through the browser.
pub struct Authenticator {
    jwt_handler: JwtHandler,
    session_lifetime: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing
    /// * `session_lifetime` - How long an issued session stays valid
    pub fn new(secret: &[u8], session_lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            session_lifetime,
        }
    }

    /// Start a session for an authenticated user.
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_session(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        let claims = SessionClaims::for_user(user_id, username, self.session_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is tampered, expired or malformed
    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Sign an arbitrary payload with the session key.
    ///
    /// The payload must carry an `exp` claim to be readable by [`Authenticator::verify`].
    pub fn sign<T: Serialize>(&self, payload: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(payload)
    }

    /// Verify a payload signed by [`Authenticator::sign`].
    pub fn verify<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}
