use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::format::HashFormat;

/// Password hasher supporting both BCrypt (legacy) and Argon2id (modern).
///
/// New passwords are always encoded with Argon2id; stored BCrypt hashes
/// keep verifying while the lazy per-login migration replaces them.
pub struct HybridPasswordHasher;

impl HybridPasswordHasher {
    /// Create a new hybrid hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with Argon2id and a fresh random salt.
    ///
    /// Two calls with the same input produce different PHC strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash of either format.
    ///
    /// Dispatches on the hash prefix. Unknown formats, malformed hashes
    /// within a recognized family, and verification mismatches all read
    /// as `false`; this never panics and never errors.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match HashFormat::classify(hash) {
            HashFormat::Argon2id => PasswordHash::new(hash)
                .map(|parsed| {
                    Argon2::default()
                        .verify_password(password.as_bytes(), &parsed)
                        .is_ok()
                })
                .unwrap_or(false),
            HashFormat::Bcrypt => bcrypt::verify(password, hash).unwrap_or(false),
            HashFormat::Unknown => false,
        }
    }

    /// Whether a stored hash should be re-encoded with Argon2id.
    ///
    /// True only for BCrypt hashes. Unknown formats are not upgrade
    /// candidates: there is no plaintext-verified record to migrate.
    pub fn needs_upgrade(&self, hash: &str) -> bool {
        HashFormat::classify(hash) == HashFormat::Bcrypt
    }
}

impl Default for HybridPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
