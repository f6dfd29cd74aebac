use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Errors of the login, refresh, and revoke flows.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Unknown email or wrong password; the two are not distinguished.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Refresh token is unknown, revoked, or expired.
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        SessionError::Storage(err.to_string())
    }
}
