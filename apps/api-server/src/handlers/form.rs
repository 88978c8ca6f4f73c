//! `multipart/form-data` parsing for the post create/edit forms.

use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;

use quill_core::domain::{CoverUpload, NewPost, PostChanges};

use crate::middleware::error::{AppError, AppResult};

/// Upper bound for a single text field.
const MAX_TEXT_FIELD_BYTES: usize = 256 * 1024;

/// The fields of a post form. Absent parts stay `None`.
#[derive(Debug, Default)]
pub struct PostForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub cover: Option<CoverUpload>,
}

impl PostForm {
    /// Drain the multipart stream. The `file` part is limited to `max_cover_bytes`.
    pub async fn read(mut payload: Multipart, max_cover_bytes: usize) -> AppResult<Self> {
        let mut form = PostForm::default();

        while let Some(field) = payload.try_next().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_owned();

            match name.as_str() {
                "file" => form.cover = read_file(field, max_cover_bytes).await?,
                "id" => form.id = Some(read_text(field).await?),
                "title" => form.title = Some(read_text(field).await?),
                "summary" => form.summary = Some(read_text(field).await?),
                "content" => form.content = Some(read_text(field).await?),
                other => {
                    tracing::debug!(field = %other, "Ignoring unknown form field");
                    read_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
                }
            }
        }

        Ok(form)
    }

    pub fn new_post(&self) -> NewPost {
        NewPost {
            title: self.title.clone().unwrap_or_default(),
            summary: self.summary.clone().unwrap_or_default(),
            content: self.content.clone().unwrap_or_default(),
        }
    }

    pub fn changes(&self) -> PostChanges {
        PostChanges {
            title: self.title.clone(),
            summary: self.summary.clone(),
            content: self.content.clone(),
            cover: None,
        }
    }
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed form data: {}", err))
}

async fn read_bytes(mut field: Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::BadRequest(format!(
                "Form field exceeds the {} byte limit",
                limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn read_text(field: Field) -> AppResult<String> {
    let bytes = read_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
    String::from_utf8(bytes).map_err(|_| AppError::BadRequest("Form field is not valid UTF-8".to_string()))
}

/// An empty file part (no file chosen in the browser) counts as no file.
async fn read_file(field: Field, limit: usize) -> AppResult<Option<CoverUpload>> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_owned();
    let content_type = field
        .content_type()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = read_bytes(field, limit).await?;
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(CoverUpload::new(file_name, content_type, bytes)))
}
