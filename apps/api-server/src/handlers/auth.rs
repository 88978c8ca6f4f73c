//! Account handlers: register, login, profile, logout.

use actix_web::{HttpResponse, web};

use quill_core::domain::User;
use quill_shared::dto::{LoginRequest, ProfileResponse, RegisterRequest, UserResponse};

use crate::middleware::auth::{Identity, cleared_token_cookie, token_cookie};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
    }
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state.accounts.register(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// POST /login - sets the `token` cookie
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (user, token) = state.accounts.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(token))
        .json(user_response(&user)))
}

/// GET /profile - Protected route
pub async fn profile(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ProfileResponse {
        username: identity.username,
        id: identity.user_id.to_string(),
        iat: identity.issued_at,
    }))
}

/// POST /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(cleared_token_cookie())
        .json("Thanks for visiting.")
}
