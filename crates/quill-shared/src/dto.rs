//! Data Transfer Objects - request/response types for the API.
//!
//! Field names follow what the blog front-end already sends and reads
//! (`Username`, `Password`, `createdAt`).

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(rename = "Username")]
    pub username: String,
}

/// The identity decoded from the caller's token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(rename = "Username")]
    pub username: String,
    pub id: String,
    pub iat: i64,
}

/// Author display information embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: String,
    #[serde(rename = "Username")]
    pub username: String,
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub cover: String,
    /// `null` when the author no longer resolves.
    pub author: Option<AuthorResponse>,
    pub created_at: String,
    pub updated_at: String,
}
