use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Save the full entity by primary key. The row must already exist;
    /// `Err(NotFound)` when it does not.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `Err(NotFound)` when no row was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every post in the table, in storage order. An empty table yields
    /// an empty vec, never an error.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;
}
