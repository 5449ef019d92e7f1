//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the web service:
//! - Password hashing (Argon2id)
//! - Signed tokens (HS256 JWT) for session cookies
//! - Session issuing and validation
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Sessions
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let authenticator = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = authenticator.issue_session(1, "alice").unwrap();
//! let claims = authenticator.validate_session(&token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
