use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persisted refresh token row.
///
/// Only the SHA-256 digest of the token is kept; the plaintext exists solely
/// in the response handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token_hash: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// New, unrevoked record expiring `ttl` after `now`, capped at the latest
    /// representable instant.
    pub fn issue(token_hash: String, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token_hash,
            user_id,
            created_at: now,
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            revoked_at: None,
        }
    }

    /// Usable iff never revoked and not yet expired.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

/// Lifetimes of the two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::hours(1),
            refresh: Duration::days(60),
        }
    }
}

/// Raw login credentials as received.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
