//! AWS S3 object storage.
//!
//! Credentials come from the config when both keys are given, otherwise from the
//! standard AWS credential chain (env vars, `~/.aws/credentials`, IAM role, ...).

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use quill_core::ports::{ObjectStorage, StorageError};

use super::S3Config;

/// Cover storage backed by a single S3 bucket.
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    base_url: String,
}

impl S3ObjectStorage {
    /// Build the S3 client for the configured region and credentials.
    pub async fn connect(config: &S3Config) -> Result<Self, StorageError> {
        if config.bucket.is_empty() {
            return Err(StorageError::Configuration("bucket name is empty".to_string()));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = aws_sdk_s3::config::Credentials::new(
                access_key,
                secret_key,
                config.session_token.clone(),
                None,
                "quill-config",
            );
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            "S3 object storage initialized"
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        tracing::debug!(bucket = %self.bucket, key = %key, size = body.len(), "S3 put_object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(e).to_string()))?;

        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
