use thiserror::Error;

/// Error type for password operations.
///
/// Verification never errors (malformed hashes read as a mismatch), so
/// only hashing can fail.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
