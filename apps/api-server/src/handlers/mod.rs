//! HTTP handlers and route configuration.

mod auth;
mod form;
mod health;
mod posts;


use actix_web::{error::JsonPayloadError, web};

use crate::middleware::error::AppError;

fn json_error(err: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Account routes
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/profile", web::get().to(auth::profile))
        .route("/logout", web::post().to(auth::logout))
        // Post routes
        .service(
            web::resource("/post")
                .route(web::get().to(posts::list_posts))
                .route(web::post().to(posts::create_post))
                .route(web::put().to(posts::update_post)),
        )
        .route("/post/{id}", web::get().to(posts::get_post));
}
