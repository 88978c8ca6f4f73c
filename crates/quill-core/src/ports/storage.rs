//! Object storage port - where cover assets live.

use async_trait::async_trait;

/// Object storage trait - abstraction over bucket backends (S3, in-memory).
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `body` under `key`.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Public base URL that objects are served from.
    fn base_url(&self) -> &str;

    /// Public URL of the object stored under `key`.
    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url().trim_end_matches('/'), key)
    }
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Storage misconfigured: {0}")]
    Configuration(String),
}
