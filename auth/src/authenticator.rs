use chrono::Duration;
use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the server's signing secret; immutable once built, so a single
/// instance is shared across requests behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed short-lived access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials, then mint an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the access token
    /// * `access_ttl` - Access token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
        access_ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(user_id, access_ttl)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow once a refresh token has been resolved.
    pub fn issue_access_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.jwt_handler.issue(user_id, ttl)
    }

    /// Verify an access token and return its user.
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);
        let user_id = Uuid::new_v4();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, user_id, Duration::hours(1))
            .expect("Authentication failed");

        let verified = authenticator
            .verify_access_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result =
            authenticator.authenticate("wrong_password", &hash, Uuid::new_v4(), Duration::hours(1));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unusable_hash() {
        let authenticator = Authenticator::new(SECRET);

        let result =
            authenticator.authenticate("password", "unset", Uuid::new_v4(), Duration::hours(1));
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let authenticator = Authenticator::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = authenticator
            .issue_access_token(user_id, Duration::minutes(5))
            .expect("Failed to generate token");

        assert_eq!(authenticator.verify_access_token(&token), Ok(user_id));
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.verify_access_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
