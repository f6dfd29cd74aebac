use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::chirp::models::ListChirpsQuery;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a chirp as `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(
        &self,
        command: CreateChirpCommand,
        author: UserId,
    ) -> Result<Chirp, ChirpError>;

    /// Retrieve a chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally for a single author, ordered by creation time.
    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp on behalf of `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - Requester is not the author
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist a new chirp.
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Returns
    /// Optional chirp (None if not found)
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// List chirps oldest first, restricted to `author` when given.
    async fn list(&self, author: Option<UserId>) -> Result<Vec<Chirp>, ChirpError>;

    /// Remove a chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
}
