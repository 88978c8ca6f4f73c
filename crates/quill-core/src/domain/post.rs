use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog post with a cover image stored in object storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    /// Public URL of the cover asset.
    pub cover: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Text fields of a post as submitted by its author.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub summary: String,
    pub content: String,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, fields: NewPost, cover: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            summary: fields.summary,
            content: fields.content,
            cover,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

/// Partial update of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub cover: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.content.is_none()
            && self.cover.is_none()
    }

    /// Apply the changes to `post`, bumping `updated_at`.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(summary) = self.summary {
            post.summary = summary;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(cover) = self.cover {
            post.cover = cover;
        }
        post.updated_at = Utc::now();
    }
}

/// Display information about a post's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// A post joined with its author.
///
/// `author` is `None` when the referenced user no longer resolves.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<Author>,
}
