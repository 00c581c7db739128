use thiserror::Error;

/// Top-level error for login and token operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh token revoked")]
    RefreshTokenRevoked,

    #[error("Failed to issue access token: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
