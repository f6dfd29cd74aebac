use std::sync::Arc;

use async_trait::async_trait;
use auth::refresh;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::models::Session;
use crate::domain::session::models::TokenLifetimes;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Session service: login, refresh, and revocation.
///
/// Access tokens are stateless; refresh tokens live in the
/// `RefreshTokenRepository`, keyed by their digest.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
    lifetimes: TokenLifetimes,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `users` - User lookup for credential checks
    /// * `refresh_tokens` - Refresh token persistence
    /// * `authenticator` - Holder of the signing secret
    /// * `lifetimes` - Access and refresh token lifetimes
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
            lifetimes,
        }
    }

    /// Generate a refresh token for `user_id`, store it, and return it.
    ///
    /// A rejected write is surfaced as-is; a fresh value is never retried.
    ///
    /// # Errors
    /// * `Storage` - Persistence rejected the write
    pub async fn issue_refresh_token(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<String, SessionError> {
        let token = refresh::generate();
        let record = RefreshTokenRecord::issue(refresh::digest(&token), user_id, Utc::now(), ttl);
        let expires_at = record.expires_at;

        self.refresh_tokens.insert(record).await?;
        tracing::debug!(user_id = %user_id, %expires_at, "Refresh token stored");

        Ok(token)
    }

    /// Owner of a usable refresh token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token unknown, revoked, or expired
    /// * `Storage` - Lookup failed
    pub async fn resolve_user(&self, refresh_token: &str) -> Result<UserId, SessionError> {
        self.refresh_tokens
            .find_user_id_by_valid_token(&refresh::digest(refresh_token))
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let email =
            EmailAddress::new(command.email).map_err(|_| SessionError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(SessionError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.id.0,
                self.lifetimes.access,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => SessionError::Password(err),
                AuthenticationError::JwtError(err) => SessionError::Token(err),
            })?;

        let refresh_token = self
            .issue_refresh_token(user.id, self.lifetimes.refresh)
            .await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let user_id = self.resolve_user(refresh_token).await?;

        let access_token = self
            .authenticator
            .issue_access_token(user_id.0, self.lifetimes.access)?;
        tracing::debug!(user_id = %user_id, "Access token refreshed");

        Ok(access_token)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        let rows = self
            .refresh_tokens
            .revoke(&refresh::digest(refresh_token))
            .await?;

        if rows == 0 {
            tracing::debug!("Revocation matched no refresh token");
        } else {
            tracing::info!("Refresh token revoked");
        }

        Ok(())
    }
}
