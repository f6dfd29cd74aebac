use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Issuer stamped on every access token.
pub const ISSUER: &str = "chirpy";

/// Access token claims.
///
/// `iat` and `exp` are RFC 7519 NumericDate values carrying millisecond
/// fractions, so lifetimes shorter than a second expire on time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (seconds since epoch)
    pub iat: f64,

    /// Expiration time (seconds since epoch)
    pub exp: f64,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` from now.
    pub fn for_user(user_id: Uuid, ttl: Duration) -> Self {
        Self::issued_at(user_id, Utc::now(), ttl)
    }

    /// Create claims for a user issued at an explicit instant.
    pub fn issued_at(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            iss: ISSUER.to_string(),
            iat: numeric_date(now),
            exp: numeric_date(expiry(now, ttl)),
        }
    }

    /// A token is expired once `now` reaches its expiration.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        numeric_date(now) >= self.exp
    }

    /// Parse the subject as a user identifier.
    ///
    /// # Errors
    /// * `Malformed` - Subject is not a UUID
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| JwtError::Malformed(format!("invalid subject: {}", e)))
    }
}

/// `now + ttl`, capped at the latest representable instant.
fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn numeric_date(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 1000.0
}
