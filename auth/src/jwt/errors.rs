use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are kept distinct for logging and tests; the HTTP
/// layer collapses them into a single unauthorized response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
