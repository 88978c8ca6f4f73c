//! Cover image uploads and their object keys.

use uuid::Uuid;

/// Path prefix used by covers written before assets moved to object storage.
pub const LEGACY_UPLOAD_PREFIX: &str = "uploads";

/// A cover image received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct CoverUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CoverUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Generate a globally unique object key: `<uuid-v4>-<file name>`.
    ///
    /// Only the last path component of the client-supplied name is kept.
    pub fn object_key(&self) -> String {
        let name = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("cover");

        format!("{}-{}", Uuid::new_v4(), name)
    }
}

/// Point legacy `uploads/...` covers at the object storage base URL.
///
/// Covers that are already absolute URLs are returned unchanged.
pub fn rewrite_legacy_cover(cover: &str, base_url: &str) -> String {
    match cover.strip_prefix(LEGACY_UPLOAD_PREFIX) {
        Some(rest) => format!("{}{}", base_url.trim_end_matches('/'), rest),
        None => cover.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_file_name() {
        let upload = CoverUpload::new("photo.png", "image/png", vec![1, 2, 3]);
        let key = upload.object_key();

        assert!(key.ends_with("-photo.png"));
        let prefix = &key[..36];
        assert!(Uuid::parse_str(prefix).is_ok());
    }

    #[test]
    fn test_object_key_is_unique() {
        let upload = CoverUpload::new("photo.png", "image/png", vec![]);
        assert_ne!(upload.object_key(), upload.object_key());
    }

    #[test]
    fn test_object_key_strips_directories() {
        let upload = CoverUpload::new("../../etc/passwd", "text/plain", vec![]);
        assert!(upload.object_key().ends_with("-passwd"));

        let upload = CoverUpload::new("C:\\Users\\me\\cat.jpg", "image/jpeg", vec![]);
        assert!(upload.object_key().ends_with("-cat.jpg"));
    }

    #[test]
    fn test_object_key_falls_back_for_empty_name() {
        let upload = CoverUpload::new("", "image/png", vec![]);
        assert!(upload.object_key().ends_with("-cover"));
    }

    #[test]
    fn test_rewrite_legacy_cover() {
        assert_eq!(
            rewrite_legacy_cover("uploads/abc.png", "https://bucket.s3.amazonaws.com/"),
            "https://bucket.s3.amazonaws.com/abc.png"
        );
        assert_eq!(
            rewrite_legacy_cover("https://cdn.example.com/abc.png", "https://bucket"),
            "https://cdn.example.com/abc.png"
        );
    }
}
