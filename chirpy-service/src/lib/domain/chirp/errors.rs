use thiserror::Error;

/// Error for ChirpId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ChirpBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpBodyError {
    #[error("Chirp is too long")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for chirp operations
#[derive(Debug, Clone, Error)]
pub enum ChirpError {
    #[error("Invalid chirp ID: {0}")]
    InvalidChirpId(#[from] ChirpIdError),

    #[error("{0}")]
    InvalidBody(#[from] ChirpBodyError),

    #[error("Chirp not found: {0}")]
    NotFound(String),

    #[error("You don't own that chirp")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
