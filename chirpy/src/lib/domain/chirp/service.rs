use std::sync::Arc;

use async_trait::async_trait;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;
use crate::chirp::ports::ChirpRepository;
use crate::chirp::ports::ChirpServicePort;
use crate::user::models::UserId;

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
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError> {
        let chirp = self
            .repository
            .create(&command.author, &command.body)
            .await?;
        tracing::info!(chirp_id = %chirp.id, user_id = %chirp.user_id, "Chirp created");

        Ok(chirp)
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id.to_string()))
    }

    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError> {
        self.repository.list(query.author, query.sort).await
    }

    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != *requester {
            tracing::warn!(chirp_id = %id, user_id = %requester, "Rejected delete by non-author");
            return Err(ChirpError::NotAuthor {
                chirp_id: id.to_string(),
                user_id: requester.to_string(),
            });
        }

        self.repository.delete(id).await?;
        tracing::info!(chirp_id = %id, user_id = %requester, "Chirp deleted");

        Ok(())
    }

    async fn delete_all_chirps(&self) -> Result<u64, ChirpError> {
        let deleted = self.repository.delete_all().await?;
        tracing::warn!(deleted, "All chirps deleted");

        Ok(deleted)
    }
}
