//! Cookie authentication - the `token` cookie and the `Identity` extractor.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use quill_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// The `token` cookie: cross-site, HTTPS-only, hidden from scripts.
pub fn token_cookie(token: String) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .same_site(SameSite::None)
        .secure(true)
        .http_only(true)
        .finish()
}

/// An emptied `token` cookie that expires immediately.
pub fn cleared_token_cookie() -> Cookie<'static> {
    let mut cookie = token_cookie(String::new());
    cookie.set_max_age(Duration::ZERO);
    cookie
}

/// Authenticated user identity extractor.
///
/// Use this in handlers to require a valid `token` cookie:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub issued_at: i64,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            issued_at: claims.issued_at,
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal("Server configuration error".to_string())));
        };

        let Some(cookie) = req.cookie(TOKEN_COOKIE) else {
            return ready(Err(AuthError::MissingToken.into()));
        };

        let result = state
            .accounts
            .verify_token(cookie.value())
            .map(Identity::from)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected token");
                AppError::from(e)
            });

        ready(result)
    }
}
