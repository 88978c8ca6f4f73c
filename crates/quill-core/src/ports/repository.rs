use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges, PostWithAuthor, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository (Credential Store).
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository (Content Store).
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Fetch a post together with its author's display name.
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Newest posts first, at most `limit` of them.
    async fn list_recent(&self, limit: u64) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// Overwrite the provided fields in place. Returns `None` if the post does not exist.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError>;
}
