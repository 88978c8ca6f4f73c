//! Object storage implementations - S3 and in-memory fallback.

mod memory;

#[cfg(feature = "s3")]
mod s3;

pub use memory::{InMemoryObjectStorage, StoredObject};

#[cfg(feature = "s3")]
pub use s3::S3ObjectStorage;

/// Configuration for the S3 cover bucket.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Public URL prefix objects are served from, e.g. `https://<bucket>.s3.<region>.amazonaws.com`.
    pub base_url: String,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...).
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}
