use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

const DUMMY_PASSWORD: &str = "dummy-password-never-stored";

/// Salted password hasher (Argon2id).
///
/// Hashes are emitted in PHC string format, so the algorithm parameters and
/// salt travel with the hash. Verification always uses the parameters stored
/// in the hash, which keeps old hashes valid after a cost change.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy_hash: OnceLock<String>,
}

impl PasswordHasher {
    /// Memory cost in KiB used by [`PasswordHasher::new`].
    pub const DEFAULT_MEMORY_KIB: u32 = Params::DEFAULT_M_COST;
    /// Number of passes used by [`PasswordHasher::new`].
    pub const DEFAULT_ITERATIONS: u32 = Params::DEFAULT_T_COST;
    /// Degree of parallelism used by [`PasswordHasher::new`].
    pub const DEFAULT_PARALLELISM: u32 = Params::DEFAULT_P_COST;

    /// Create a hasher with the recommended Argon2id parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            dummy_hash: OnceLock::new(),
        }
    }

    /// Create a hasher with explicit Argon2id cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes over memory
    /// * `parallelism` - Number of lanes
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside Argon2 limits
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: OnceLock::new(),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on mismatch. The digest comparison inside the
    /// verifier is constant-time.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or uses unsupported parameters
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }

    /// Run a full verification against a throwaway hash made with this
    /// hasher's parameters.
    ///
    /// Used when there is no stored hash to check, so that the caller takes
    /// as long as it would for a wrong password. The hash is built on first use.
    ///
    /// # Errors
    /// * `HashingFailed` - The throwaway hash could not be built
    pub fn verify_dummy(&self, password: &str) -> Result<(), PasswordError> {
        let dummy = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash(DUMMY_PASSWORD)?;
                self.dummy_hash.get_or_init(|| hash)
            }
        };

        self.verify(password, dummy).map(|_| ())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
