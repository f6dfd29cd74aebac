use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Authorization header missing")]
    MissingHeader,

    #[error("Malformed authorization header")]
    MalformedHeader,
}
