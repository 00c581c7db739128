use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Wrong password or unreadable stored hash. The two cases are not distinguished.
    #[error("Password does not match")]
    Mismatch,
}
