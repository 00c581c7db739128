use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshToken;
use crate::session::models::Session;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for login, refresh and revocation.
pub struct SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    user_repository: Arc<UR>,
    token_repository: Arc<TR>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<UR, TR> SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - Used to look users up by email
    /// * `token_repository` - Refresh token persistence
    /// * `authenticator` - Password verification and access token issuance
    /// * `refresh_token_ttl` - Lifetime of refresh tokens created at login
    pub fn new(
        user_repository: Arc<UR>,
        token_repository: Arc<TR>,
        authenticator: Arc<Authenticator>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            authenticator,
            refresh_token_ttl,
        }
    }

    /// Honour a client-requested lifetime only when it is shorter than the configured one.
    fn access_token_ttl(&self, requested_seconds: Option<i64>) -> Duration {
        let max = self.authenticator.access_token_ttl();
        match requested_seconds {
            Some(seconds) if seconds > 0 && seconds < max.num_seconds() => {
                Duration::seconds(seconds)
            }
            _ => max,
        }
    }
}

#[async_trait]
impl<UR, TR> SessionServicePort for SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = self
            .user_repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?
            .ok_or(SessionError::InvalidCredentials)?;

        let ttl = self.access_token_ttl(command.expires_in_seconds);
        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0, ttl)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials
                | AuthenticationError::PasswordError(_) => SessionError::InvalidCredentials,
                AuthenticationError::JwtError(err) => SessionError::TokenIssuance(err.to_string()),
            })?;

        let refresh_token = RefreshToken::new(
            self.authenticator.generate_refresh_token(),
            user.id,
            Utc::now(),
            self.refresh_token_ttl,
        );
        self.token_repository.create(&refresh_token).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let stored = self
            .token_repository
            .find(refresh_token)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)?;

        if stored.is_expired(Utc::now()) {
            return Err(SessionError::RefreshTokenExpired);
        }
        if stored.is_revoked() {
            return Err(SessionError::RefreshTokenRevoked);
        }

        self.authenticator
            .issue_access_token(stored.user_id.0)
            .map_err(|e| SessionError::TokenIssuance(e.to_string()))
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.token_repository
            .revoke(refresh_token, Utc::now())
            .await?;
        tracing::info!("Refresh token revoked");

        Ok(())
    }
}
