use thiserror::Error;

use crate::user::errors::UserIdError;

/// Error for ChirpId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for chirp body validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpBodyError {
    #[error("Chirp is too long")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all chirp-related operations
#[derive(Debug, Clone, Error)]
pub enum ChirpError {
    #[error("Invalid chirp ID: {0}")]
    InvalidChirpId(#[from] ChirpIdError),

    #[error("{0}")]
    InvalidBody(#[from] ChirpBodyError),

    #[error("Invalid author ID: {0}")]
    InvalidAuthorId(#[from] UserIdError),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("Chirp not found: {0}")]
    NotFound(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("User {user_id} is not the author of chirp {chirp_id}")]
    NotAuthor { chirp_id: String, user_id: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}
