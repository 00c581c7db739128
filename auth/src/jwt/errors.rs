use thiserror::Error;

/// Error type for JWT operations.
///
/// Every variant except `EncodingFailed` means the presented token must be rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token subject is not a valid user id: {0}")]
    InvalidSubject(String),
}
