//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use quill_core::ports::{
    ObjectStorage, PasswordService, PostRepository, TokenService, UserRepository,
};
use quill_core::{AccountService, PostService};
use quill_infra::{
    Argon2PasswordService, InMemoryObjectStorage, InMemoryPostRepository, InMemoryUserRepository,
    JwtTokenService,
};

#[cfg(feature = "postgres")]
use quill_infra::{PostgresPostRepository, PostgresUserRepository};
#[cfg(feature = "s3")]
use quill_infra::S3ObjectStorage;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub max_cover_bytes: usize,
}

type Repositories = (Arc<dyn UserRepository>, Arc<dyn PostRepository>);

fn in_memory_repositories() -> Repositories {
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new(users.clone()));
    (users, posts)
}

impl AppState {
    /// Build the application state with the configured backends.
    pub async fn new(config: &AppConfig) -> io::Result<Self> {
        #[cfg(feature = "postgres")]
        let (users, posts): Repositories = match &config.database {
            Some(db_config) => {
                let conn = quill_infra::database::connect(db_config)
                    .await
                    .map_err(|e| io::Error::other(format!("database connection failed: {e}")))?;
                let users: Arc<dyn UserRepository> =
                    Arc::new(PostgresUserRepository::new(conn.clone()));
                let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(conn));
                (users, posts)
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory_repositories()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts): Repositories = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory_repositories()
        };

        let storage: Arc<dyn ObjectStorage> = match &config.s3 {
            #[cfg(feature = "s3")]
            Some(s3_config) => Arc::new(
                S3ObjectStorage::connect(s3_config)
                    .await
                    .map_err(|e| io::Error::other(e.to_string()))?,
            ),
            #[cfg(not(feature = "s3"))]
            Some(_) => {
                tracing::warn!("S3_BUCKET_NAME is set but the s3 feature is disabled - covers stay in memory");
                Arc::new(InMemoryObjectStorage::new(config.storage_base_url.clone()))
            }
            None => {
                tracing::warn!(
                    base_url = %config.storage_base_url,
                    "S3_BUCKET_NAME not set. Covers are kept in memory and are not served over HTTP."
                );
                Arc::new(InMemoryObjectStorage::new(config.storage_base_url.clone()))
            }
        };

        let state = Self::from_parts(
            users,
            posts,
            storage,
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            Arc::new(Argon2PasswordService),
            config.max_cover_bytes,
        );

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Assemble the services from already-built adapters.
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        storage: Arc<dyn ObjectStorage>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        max_cover_bytes: usize,
    ) -> Self {
        let accounts = AccountService::new(users.clone(), passwords, tokens);
        let posts = PostService::new(posts, users, storage);

        Self {
            accounts: Arc::new(accounts),
            posts: Arc::new(posts),
            max_cover_bytes,
        }
    }
}
