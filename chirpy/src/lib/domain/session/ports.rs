use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshToken;
use crate::session::models::Session;

/// Port for login and token lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Check credentials and open a session.
    ///
    /// # Returns
    /// The user together with a fresh access token and refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TokenIssuance` - Access token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token is unknown
    /// * `RefreshTokenExpired` - Token is past its expiry
    /// * `RefreshTokenRevoked` - Token was revoked
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token is unknown
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh token.
    async fn create(&self, token: &RefreshToken) -> Result<(), SessionError>;

    /// Retrieve a refresh token by its opaque value.
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Mark a token as revoked at `revoked_at`. Already revoked tokens keep their first timestamp.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token is unknown
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), SessionError>;
}
