//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Author, Post, PostChanges, PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

/// In-memory user store. Usernames are unique, as with the database index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username || u.id == user.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

/// In-memory post store. Authors are resolved through the given user repository.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    users: Arc<dyn UserRepository>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            users,
        }
    }

    async fn resolve(&self, post: Post) -> Result<PostWithAuthor, RepoError> {
        let author = self.users.find_by_id(post.author_id).await?.map(|u| Author {
            id: u.id,
            username: u.username,
        });
        Ok(PostWithAuthor { post, author })
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        posts.push(post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        match self.find_by_id(id).await? {
            Some(post) => Ok(Some(self.resolve(post).await?)),
            None => Ok(None),
        }
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<PostWithAuthor>, RepoError> {
        let mut recent: Vec<Post> = {
            let posts = self.posts.read().await;
            posts.iter().rev().cloned().collect()
        };
        // Stable sort over reverse insertion order: equal timestamps list the later insert first.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        let mut resolved = Vec::with_capacity(recent.len());
        for post in recent {
            resolved.push(self.resolve(post).await?);
        }
        Ok(resolved)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        changes.apply(post);
        Ok(Some(post.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use quill_core::domain::NewPost;

    fn post_at(author_id: Uuid, title: &str, minutes_ago: i64) -> Post {
        let mut post = Post::new(
            author_id,
            NewPost {
                title: title.to_string(),
                summary: "summary".to_string(),
                content: "content".to_string(),
            },
            "https://cdn.example.com/c.png".to_string(),
        );
        post.created_at = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn test_duplicate_username_is_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("alice".to_string(), "h1".to_string()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("alice".to_string(), "h2".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(User::new("alice".to_string(), "h".to_string()))
            .await
            .unwrap();

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first_and_limits() {
        let users = Arc::new(InMemoryUserRepository::new());
        let author = users
            .insert(User::new("alice".to_string(), "h".to_string()))
            .await
            .unwrap();
        let repo = InMemoryPostRepository::new(users);

        for minutes_ago in [5, 50, 1, 30, 10] {
            repo.insert(post_at(author.id, &format!("{minutes_ago}m"), minutes_ago))
                .await
                .unwrap();
        }

        let recent = repo.list_recent(3).await.unwrap();
        let titles: Vec<_> = recent.iter().map(|p| p.post.title.as_str()).collect();
        assert_eq!(titles, vec!["1m", "5m", "10m"]);
        assert_eq!(
            recent[0].author.as_ref().map(|a| a.username.as_str()),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn test_missing_author_resolves_to_none() {
        let users = Arc::new(InMemoryUserRepository::new());
        let repo = InMemoryPostRepository::new(users);
        let post = repo.insert(post_at(Uuid::new_v4(), "orphan", 0)).await.unwrap();

        let found = repo.find_with_author(post.id).await.unwrap().unwrap();
        assert!(found.author.is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_only_given_fields() {
        let users = Arc::new(InMemoryUserRepository::new());
        let repo = InMemoryPostRepository::new(users);
        let post = repo.insert(post_at(Uuid::new_v4(), "old", 0)).await.unwrap();

        let updated = repo
            .update(
                post.id,
                PostChanges {
                    content: Some("new content".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "old");
        assert_eq!(updated.content, "new content");
        assert_eq!(updated.cover, post.cover);
    }

    #[tokio::test]
    async fn test_update_unknown_post() {
        let repo = InMemoryPostRepository::new(Arc::new(InMemoryUserRepository::new()));
        let result = repo.update(Uuid::new_v4(), PostChanges::default()).await.unwrap();
        assert!(result.is_none());
    }
}
