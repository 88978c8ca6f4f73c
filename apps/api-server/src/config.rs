//! Application configuration loaded from environment variables.
//!
//! Read once at startup; everything downstream receives it by value.

use std::env;

use quill_infra::auth::{DEFAULT_SECRET, JwtConfig};
use quill_infra::S3Config;
#[cfg(feature = "postgres")]
use quill_infra::DatabaseConfig;

/// Default upper bound for an uploaded cover image.
pub const DEFAULT_MAX_COVER_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    /// `None` keeps covers in memory.
    pub s3: Option<S3Config>,
    /// Base URL used for covers when no bucket is configured.
    pub storage_base_url: String,
    /// Browser origin allowed to make credentialed cross-origin requests.
    pub cors_origin: String,
    pub max_cover_bytes: usize,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn is_production() -> bool {
    env::var("RUST_ENV")
        .map(|v| v == "production" || v == "prod")
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let port = parse_or("PORT", 8000);

        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 2),
        });

        Self {
            host: var_or("HOST", "127.0.0.1"),
            port,
            #[cfg(feature = "postgres")]
            database,
            jwt: Self::jwt_from_env(),
            s3: Self::s3_from_env(),
            storage_base_url: var_or("S3_BASE_URL", &format!("http://localhost:{port}/uploads")),
            cors_origin: var_or("CORS_ORIGIN", "http://localhost:3000"),
            max_cover_bytes: parse_or("MAX_COVER_BYTES", DEFAULT_MAX_COVER_BYTES),
        }
    }

    fn jwt_from_env() -> JwtConfig {
        let secret = var_or("JWT_SECRET", DEFAULT_SECRET);

        if secret == DEFAULT_SECRET {
            if is_production() {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        JwtConfig {
            secret,
            issuer: var_or("JWT_ISSUER", "quill-api"),
        }
    }

    /// S3 settings, present only when `S3_BUCKET_NAME` is set.
    fn s3_from_env() -> Option<S3Config> {
        let bucket = env::var("S3_BUCKET_NAME").ok().filter(|b| !b.is_empty())?;
        let region = var_or("AWS_REGION", "us-east-1");
        let base_url = env::var("S3_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.{region}.amazonaws.com"));

        Some(S3Config {
            bucket,
            region,
            base_url,
            endpoint_url: env::var("S3_ENDPOINT_URL").ok(),
            force_path_style: parse_or("S3_FORCE_PATH_STYLE", false),
            access_key_id: env::var("AWS_ACCESS_KEY_ID").ok(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").ok(),
            session_token: env::var("AWS_SESSION_TOKEN").ok(),
        })
    }
}
