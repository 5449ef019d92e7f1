use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of a signed session token.
///
/// Identifies the authenticated user by store id (`sub`) and carries the
/// username so pages can greet the user without a lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Authenticated user id
    pub sub: i64,

    /// Authenticated username
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for a session starting now.
    ///
    /// # Arguments
    /// * `user_id` - Store id of the user
    /// * `username` - Username of the user
    /// * `lifetime` - Time until the session expires
    pub fn for_user(user_id: i64, username: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            username: username.into(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = SessionClaims::for_user(7, "alice", Duration::hours(24));

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }
}
