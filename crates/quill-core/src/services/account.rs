//! Registration, login and token verification.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, TokenClaims, TokenService, UserRepository};

/// Credential store and auth service.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new user. Usernames are unique.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }

        let password_hash = self.passwords.hash(password).await?;
        let user = User::new(username.to_string(), password_hash);

        // A concurrent registration can still win the race; the unique index decides.
        let user = self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::DuplicateUsername(username.to_string()),
            other => DomainError::Repo(other),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username/password pair.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.passwords.verify(password, &user.password_hash).await? {
            tracing::debug!(username = %username, "Rejected login with incorrect password");
            return Err(AuthError::IncorrectPassword.into());
        }

        Ok(user)
    }

    /// Authenticate and issue a bearer token for the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), DomainError> {
        let user = self.authenticate(username, password).await?;
        let token = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, token))
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.tokens.issue_token(user.id, &user.username)
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.tokens.verify_token(token)
    }
}
