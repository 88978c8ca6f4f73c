//! In-memory object storage - used when no bucket is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{ObjectStorage, StorageError};

/// An object held by [`InMemoryObjectStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Object storage in a `HashMap`. Data is lost on process restart.
pub struct InMemoryObjectStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
    base_url: String,
}

impl InMemoryObjectStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            base_url: base_url.into(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Dereference a public URL produced by [`ObjectStorage::public_url`].
    pub async fn get_by_url(&self, url: &str) -> Option<StoredObject> {
        let prefix = format!("{}/", self.base_url.trim_end_matches('/'));
        let key = url.strip_prefix(&prefix)?;
        self.get(key).await
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes: body,
            },
        );
        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_dereference_url() {
        let storage = InMemoryObjectStorage::new("https://cdn.example.com/");
        storage
            .put("abc-cover.png", vec![0x89, 0x50, 0x4e, 0x47], "image/png")
            .await
            .unwrap();

        let url = storage.public_url("abc-cover.png");
        assert_eq!(url, "https://cdn.example.com/abc-cover.png");

        let object = storage.get_by_url(&url).await.unwrap();
        assert_eq!(object.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(object.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_foreign_url_does_not_resolve() {
        let storage = InMemoryObjectStorage::new("https://cdn.example.com");
        storage.put("k", vec![1], "image/png").await.unwrap();

        assert!(storage.get_by_url("https://elsewhere.example.com/k").await.is_none());
        assert!(storage.get("k").await.is_some());
    }
}
