//! Domain entities - the core business objects.

mod cover;
mod post;
mod user;

pub use cover::{CoverUpload, LEGACY_UPLOAD_PREFIX, rewrite_legacy_cover};
pub use post::{Author, NewPost, Post, PostChanges, PostWithAuthor};
pub use user::User;
