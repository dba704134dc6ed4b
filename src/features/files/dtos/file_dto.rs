use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::validation::not_blank;

/// Upload form for OpenAPI documentation.
/// The handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// Image to upload (jpeg, png, gif, webp or svg, at most 10 MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Destination folder inside the bucket, defaults to `uploads`
    #[schema(example = "2024/11")]
    pub folder: Option<String>,
    /// Replace an existing file with the same name
    #[schema(example = false)]
    pub overwrite: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Folder to list; the bucket root when absent
    pub folder: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadFileQuery {
    pub path: String,
}

/// Request DTO for deleting a stored file
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteFileDto {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "2024/11/hero.jpg")]
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    pub deleted: bool,
}

/// File extension for an accepted image MIME type
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

/// MIME type guessed from a path's extension, for serving stored media
pub fn content_type_for_path(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(content_type_for_path("2024/1/a.JPG"), "image/jpeg");
        assert_eq!(content_type_for_path("logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for_path("README"), "application/octet-stream");
    }
}
