use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::models::Session;
use crate::domain::user::models::UserId;

/// Port for session operations exposed to the HTTP layer.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Check credentials and open a session.
    ///
    /// # Returns
    /// The user, a signed access token, and a persisted refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored hash is unusable
    /// * `Token` - Access token signing failed
    /// * `Storage` - User lookup or refresh token write failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token unknown, revoked, or expired
    /// * `Token` - Access token signing failed
    /// * `Storage` - Lookup failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token. Revoking an unknown or already revoked token
    /// succeeds.
    ///
    /// # Errors
    /// * `Storage` - Update failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens.
///
/// Every method takes the token digest, never the plaintext token.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Store a new refresh token.
    ///
    /// # Errors
    /// * `Storage` - Write rejected (including a digest collision)
    async fn insert(&self, record: RefreshTokenRecord) -> Result<(), SessionError>;

    /// Owner of a token that is neither revoked nor expired.
    ///
    /// # Returns
    /// Optional user ID (None for unknown, revoked, or expired tokens)
    async fn find_user_id_by_valid_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserId>, SessionError>;

    /// Set the revocation timestamp to now.
    ///
    /// # Returns
    /// Number of rows matched
    async fn revoke(&self, token_hash: &str) -> Result<u64, SessionError>;
}
