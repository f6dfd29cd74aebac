use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::chirp::models::ListChirpsQuery;
use crate::domain::chirp::models::SortOrder;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for chirp operations.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(
        &self,
        command: CreateChirpCommand,
        author: UserId,
    ) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body: command.body,
            user_id: author,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(chirp).await?;
        tracing::info!(chirp_id = %created.id, user_id = %author, "Chirp created");

        Ok(created)
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id.to_string()))
    }

    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.repository.list(query.author_id).await?;

        match query.sort {
            SortOrder::Asc => chirps.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Desc => chirps.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(chirps)
    }

    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != *requester {
            tracing::warn!(
                chirp_id = %id,
                user_id = %requester,
                "Refused to delete chirp of another user"
            );
            return Err(ChirpError::Forbidden);
        }

        self.repository.delete(id).await?;
        tracing::info!(chirp_id = %id, user_id = %requester, "Chirp deleted");

        Ok(())
    }
}
