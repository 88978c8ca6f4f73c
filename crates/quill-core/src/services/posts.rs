//! Post creation, listing and editing.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{CoverUpload, NewPost, Post, PostChanges, PostWithAuthor, rewrite_legacy_cover};
use crate::error::DomainError;
use crate::ports::{AuthError, ObjectStorage, PostRepository, UserRepository};

/// Number of posts returned by [`PostService::list`].
pub const DEFAULT_PAGE_SIZE: u64 = 32;

/// Content store service. Covers are uploaded before the post row is written.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn ObjectStorage>,
    page_size: u64,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            posts,
            users,
            storage,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a post for `author_id`. A cover image is mandatory.
    pub async fn create(
        &self,
        author_id: Uuid,
        fields: NewPost,
        cover: Option<CoverUpload>,
    ) -> Result<Post, DomainError> {
        let cover = cover.ok_or_else(|| DomainError::Validation("Cover file is required".to_string()))?;
        if fields.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }

        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(DomainError::not_found("User", author_id));
        }

        let cover_url = self.upload_cover(cover).await?;
        let post = self.posts.insert(Post::new(author_id, fields, cover_url)).await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// The newest posts, with legacy cover paths rewritten.
    pub async fn list(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        let posts = self.posts.list_recent(self.page_size).await?;
        Ok(posts.into_iter().map(|p| self.with_public_cover(p)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<PostWithAuthor, DomainError> {
        let post = self
            .posts
            .find_with_author(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        Ok(self.with_public_cover(post))
    }

    /// Edit a post. Only its author may do so; a new cover replaces the old URL.
    pub async fn update(
        &self,
        id: Uuid,
        requester_id: Uuid,
        mut changes: PostChanges,
        cover: Option<CoverUpload>,
    ) -> Result<Post, DomainError> {
        if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation("Title is required".to_string()));
        }

        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        if !existing.is_authored_by(requester_id) {
            tracing::warn!(post_id = %id, requester_id = %requester_id, "Rejected edit by non-author");
            return Err(AuthError::NotAuthorized.into());
        }

        if let Some(cover) = cover {
            changes.cover = Some(self.upload_cover(cover).await?);
        }

        if changes.is_empty() {
            return Ok(existing);
        }

        let post = self
            .posts
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    async fn upload_cover(&self, cover: CoverUpload) -> Result<String, DomainError> {
        let key = cover.object_key();

        self.storage
            .put(&key, cover.bytes, &cover.content_type)
            .await
            .inspect_err(|e| tracing::error!(key = %key, error = %e, "Cover upload failed"))?;

        Ok(self.storage.public_url(&key))
    }

    fn with_public_cover(&self, mut entry: PostWithAuthor) -> PostWithAuthor {
        entry.post.cover = rewrite_legacy_cover(&entry.post.cover, self.storage.base_url());
        entry
    }
}
