//! Post handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Author, Post, PostWithAuthor};
use quill_shared::dto::{AuthorResponse, PostResponse};

use crate::handlers::form::PostForm;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post, author: Option<Author>) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        summary: post.summary,
        content: post.content,
        cover: post.cover,
        author: author.map(|a| AuthorResponse {
            id: a.id.to_string(),
            username: a.username,
        }),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn listed_post_response(entry: PostWithAuthor) -> PostResponse {
    post_response(entry.post, entry.author)
}

/// The caller, as the author of the post being returned.
fn author_of(identity: &Identity) -> Author {
    Author {
        id: identity.user_id,
        username: identity.username.clone(),
    }
}

/// Unknown and malformed ids both read as "not found".
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound("Post not found".to_string()))
}

/// POST /post - Protected route, multipart form
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = PostForm::read(payload, state.max_cover_bytes).await?;
    let fields = form.new_post();

    let post = state
        .posts
        .create(identity.user_id, fields, form.cover)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post, Some(author_of(&identity)))))
}

/// GET /post - newest posts first
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(listed_post_response)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /post/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    let post = state.posts.get(id).await?;

    Ok(HttpResponse::Ok().json(listed_post_response(post)))
}

/// PUT /post - Protected route, multipart form; only the author may edit
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = PostForm::read(payload, state.max_cover_bytes).await?;
    let id = form
        .id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Post id is required".to_string()))
        .and_then(parse_post_id)?;
    let changes = form.changes();

    let post = state
        .posts
        .update(id, identity.user_id, changes, form.cover)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post, Some(author_of(&identity)))))
}
