use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Access token handler: mints and verifies HS256 tokens.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        // exp carries millisecond fractions; Claims::is_expired checks it after decoding.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iss"]);
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        }
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue an access token for `user_id` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, ttl))
    }

    /// Check signature and issuer, returning the decoded claims.
    ///
    /// Expiry is not checked here; see [`JwtHandler::verify`].
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with this handler's secret
    /// * `Malformed` - Token cannot be parsed or has the wrong issuer
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verify an access token and return the user it was issued for.
    ///
    /// Purely computational: no storage is consulted.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match
    /// * `Expired` - Current time is at or past `exp`
    /// * `Malformed` - Unparsable token, wrong issuer, or non-UUID subject
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(Utc::now()) {
            return Err(JwtError::Expired);
        }

        claims.user_id()
    }
}
