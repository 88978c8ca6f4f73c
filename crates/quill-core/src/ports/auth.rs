//! Authentication and authorization ports.

use async_trait::async_trait;
use uuid::Uuid;

/// Identity carried in a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub issued_at: i64,
}

/// Token service trait for issuing and verifying signed bearer tokens.
///
/// Tokens carry no expiry; validity depends only on the signing secret.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user.
    fn issue_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError>;

    /// Verify a token's signature and decode its identity.
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
///
/// Hashing is CPU and memory heavy; implementations must not run it on the
/// calling async worker.
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Token is invalid or expired: {0}")]
    InvalidOrExpiredToken(String),

    #[error("Missing token cookie")]
    MissingToken,

    #[error("You are not an authorized user")]
    NotAuthorized,

    #[error("Hashing error: {0}")]
    Hashing(String),
}
