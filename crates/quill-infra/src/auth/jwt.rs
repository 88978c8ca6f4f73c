//! JWT token service implementation.
//!
//! Tokens are signed with HS256 and never expire: the claims carry no `exp`
//! and validation does not require one.

use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{AuthError, TokenClaims, TokenService};

/// Fallback signing secret used when `JWT_SECRET` is not set.
pub const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            issuer: "quill-api".to_string(),
        }
    }
}

/// Wire claims. Field names match what browser clients read from `/profile`.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "Username")]
    username: String,
    id: String,
    iat: i64,
    iss: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        validation.set_issuer(&[&config.issuer]);

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
            id: user_id.to_string(),
            iat: Utc::now().timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidOrExpiredToken(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidOrExpiredToken(e.to_string()))?;

        let user_id = Uuid::parse_str(&token_data.claims.id)
            .map_err(|e| AuthError::InvalidOrExpiredToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            username: token_data.claims.username,
            issued_at: token_data.claims.iat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.issue_token(user_id, "alice").unwrap();
        assert!(!token.is_empty());

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_verify_garbage_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.verify_token("invalid-token");
        assert!(matches!(result, Err(AuthError::InvalidOrExpiredToken(_))));
    }

    #[test]
    fn test_verify_token_signed_with_other_secret() {
        let issuer = JwtTokenService::new(JwtConfig {
            secret: "other-secret".to_string(),
            issuer: "test-issuer".to_string(),
        });
        let verifier = JwtTokenService::new(test_config());

        let token = issuer.issue_token(Uuid::new_v4(), "mallory").unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer1".to_string(),
        });
        let service2 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer2".to_string(),
        });

        let token = service1.issue_token(Uuid::new_v4(), "bob").unwrap();
        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_has_no_expiry_claim() {
        let service = JwtTokenService::new(test_config());
        let token = service.issue_token(Uuid::new_v4(), "carol").unwrap();

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(&[]), &validation)
            .unwrap();

        assert!(raw.claims.get("exp").is_none());
        assert_eq!(raw.claims["Username"], "carol");
    }
}
