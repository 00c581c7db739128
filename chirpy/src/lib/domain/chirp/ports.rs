use async_trait::async_trait;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;
use crate::chirp::models::SortOrder;
use crate::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a chirp on behalf of an authenticated user.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Author account no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// Retrieve a single chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally restricted to one author, ordered by creation time.
    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp if `requester` is its author.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `NotAuthor` - Requester did not post the chirp
    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError>;

    /// Delete every chirp.
    ///
    /// # Returns
    /// Number of deleted chirps
    async fn delete_all_chirps(&self) -> Result<u64, ChirpError>;
}

/// Persistence operations for chirp aggregate.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist a new chirp; the store assigns id and timestamps.
    async fn create(&self, author: &UserId, body: &ChirpBody) -> Result<Chirp, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Returns
    /// Optional chirp entity (None if not found)
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Retrieve chirps ordered by `created_at`, optionally filtered by author.
    async fn list(
        &self,
        author: Option<UserId>,
        order: SortOrder,
    ) -> Result<Vec<Chirp>, ChirpError>;

    /// Remove a chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;

    /// Remove all chirps.
    async fn delete_all(&self) -> Result<u64, ChirpError>;
}
