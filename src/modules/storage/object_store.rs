//! Object storage facade shared by the MinIO client and the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::shared::validation::{is_valid_storage_path, is_valid_upload_path};

/// Options for [`ObjectStore::upload`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Replace an existing object at the same path instead of failing with `Conflict`
    pub overwrite: bool,
}

/// A blob that has been written to the object store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredFile {
    /// Path of the object inside its bucket (e.g. `2024/1/abc.jpg`)
    pub path: String,
    /// Public URL derived from the path
    pub public_url: String,
    /// Bucket (namespace) holding the object
    pub bucket: String,
    /// Size in bytes
    pub size: u64,
    pub content_type: String,
}

/// One entry of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileDescriptor {
    /// File name relative to the listed folder
    pub name: String,
    /// Full path inside the bucket
    pub path: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Storage abstraction for uploaded images.
///
/// Paths are `/`-separated and relative to the store's bucket. Implementations do not retry.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket (namespace) the store writes to
    fn bucket(&self) -> &str;

    /// Deterministic public URL for a path. Never touches the network.
    fn public_url(&self, path: &str) -> String;

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        options: UploadOptions,
    ) -> Result<StoredFile>;

    async fn download(&self, path: &str) -> Result<Vec<u8>>;

    /// List the files directly inside `folder` (`""` for the bucket root), sorted by name
    async fn list(&self, folder: &str) -> Result<Vec<FileDescriptor>>;

    /// Delete the object at `path`. Deleting a missing object succeeds.
    async fn delete(&self, path: &str) -> Result<()>;
}

/// `{endpoint}/{bucket}/{path}`
pub fn public_url_for(endpoint: &str, bucket: &str, path: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, path)
}

/// Reject paths that could escape the bucket or that the backends cannot address
pub fn ensure_valid_path(path: &str) -> Result<()> {
    if is_valid_storage_path(path) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid storage path '{}'",
            path
        )))
    }
}

/// Reject upload targets outside the `[A-Za-z0-9._-]` segment charset
pub fn ensure_upload_path(path: &str) -> Result<()> {
    if is_valid_upload_path(path) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid upload path '{}'",
            path
        )))
    }
}

/// Normalize a folder argument: `""` or `"/"` is the root, trailing slashes are ignored.
///
/// Returns the listing prefix (`""` or `"folder/"`).
pub fn folder_prefix(folder: &str) -> Result<String> {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        return Ok(String::new());
    }
    ensure_valid_path(folder)?;
    Ok(format!("{}/", folder))
}

/// Recover the storage path embedded in a public image URL.
///
/// The path is whatever follows the first path segment equal to `bucket`, percent-decoded.
/// URLs that cannot be parsed, do not contain the bucket segment, or do not yield a valid
/// storage path return `None`.
pub fn extract_storage_path(url: &str, bucket: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut segments = parsed.path_segments()?;

    segments.by_ref().find(|segment| *segment == bucket)?;

    let decoded = segments
        .map(|segment| urlencoding::decode(segment).map(|s| s.into_owned()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;

    let path = decoded.join("/");
    is_valid_storage_path(&path).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_for() {
        assert_eq!(
            public_url_for("https://cdn.example.com/", "blogs", "2024/1/abc.jpg"),
            "https://cdn.example.com/blogs/2024/1/abc.jpg"
        );
    }

    #[test]
    fn test_extract_path_after_bucket_segment() {
        assert_eq!(
            extract_storage_path("https://host/blogs/2024/1/abc.jpg", "blogs"),
            Some("2024/1/abc.jpg".to_string())
        );
        assert_eq!(
            extract_storage_path(
                "https://x.example.co/storage/v1/object/public/blogs/cover.png?v=3",
                "blogs"
            ),
            Some("cover.png".to_string())
        );
    }

    #[test]
    fn test_extract_path_round_trips_public_url() {
        let url = public_url_for("http://localhost:9000", "blogs", "2025/06/hero.webp");
        assert_eq!(
            extract_storage_path(&url, "blogs"),
            Some("2025/06/hero.webp".to_string())
        );
    }

    #[test]
    fn test_extract_path_decodes_segments() {
        assert_eq!(
            extract_storage_path("https://host/blogs/2024/my%2Dphoto.jpg", "blogs"),
            Some("2024/my-photo.jpg".to_string())
        );
    }

    #[test]
    fn test_extract_path_keeps_spaces_and_non_ascii() {
        assert_eq!(
            extract_storage_path("https://host/blogs/2024/1/my%20photo.jpg", "blogs"),
            Some("2024/1/my photo.jpg".to_string())
        );
        assert_eq!(
            extract_storage_path("https://host/blogs/caf%C3%A9.jpg", "blogs"),
            Some("café.jpg".to_string())
        );
        assert_eq!(
            extract_storage_path("https://host/blogs/IMG%20(1).png", "blogs"),
            Some("IMG (1).png".to_string())
        );
    }

    #[test]
    fn test_ensure_upload_path_rejects_what_delete_accepts() {
        assert!(ensure_valid_path("2024/my photo.jpg").is_ok());
        assert!(matches!(
            ensure_upload_path("2024/my photo.jpg"),
            Err(AppError::BadRequest(_))
        ));
        assert!(ensure_upload_path("2024/my-photo.jpg").is_ok());
    }

    #[test]
    fn test_extract_path_skips_foreign_urls() {
        // different bucket
        assert_eq!(
            extract_storage_path("https://host/brands/logo.png", "blogs"),
            None
        );
        // bucket only as a host label
        assert_eq!(extract_storage_path("https://blogs.host/a.png", "blogs"), None);
        // nothing after the bucket
        assert_eq!(extract_storage_path("https://host/blogs/", "blogs"), None);
        assert_eq!(extract_storage_path("https://host/blogs", "blogs"), None);
        // not a URL
        assert_eq!(extract_storage_path("data:image/png;base64,AAAA", "blogs"), None);
        assert_eq!(extract_storage_path("not a url", "blogs"), None);
        // traversal
        assert_eq!(
            extract_storage_path("https://host/blogs/%2E%2E/secret", "blogs"),
            None
        );
    }

    #[test]
    fn test_folder_prefix() {
        assert_eq!(folder_prefix("").unwrap(), "");
        assert_eq!(folder_prefix("/").unwrap(), "");
        assert_eq!(folder_prefix("2024/1/").unwrap(), "2024/1/");
        assert!(folder_prefix("../up").is_err());
    }
}
