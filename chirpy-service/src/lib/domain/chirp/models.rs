use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// A short post written by a user.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp text, length-checked and with profanity masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    /// Bodies must be strictly shorter than this many bytes.
    pub const MAX_LENGTH: usize = 140;

    const PROFANITY: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];
    const MASK: &'static str = "****";

    /// Validate and clean a raw body.
    ///
    /// Words are split on single spaces; a word matching the profanity list
    /// case-insensitively is replaced by `****`. Punctuation attached to a
    /// word prevents the match.
    ///
    /// # Errors
    /// * `TooLong` - Body is `MAX_LENGTH` bytes or longer
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        if body.len() >= Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: body.len(),
            });
        }

        Ok(Self(Self::mask_profanity(&body)))
    }

    /// Wrap a body that was already validated, e.g. when loading from storage.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    fn mask_profanity(body: &str) -> String {
        body.split(' ')
            .map(|word| {
                if Self::PROFANITY
                    .iter()
                    .any(|banned| word.eq_ignore_ascii_case(banned))
                {
                    Self::MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Order of chirp listings by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Command to post a new chirp.
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub body: ChirpBody,
}

/// Filters for listing chirps.
#[derive(Debug, Clone, Default)]
pub struct ListChirpsQuery {
    pub author_id: Option<UserId>,
    pub sort: SortOrder,
}
