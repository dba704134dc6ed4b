use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::extension_for_content_type;
use crate::modules::storage::{FileDescriptor, ObjectStore, StoredFile, UploadOptions};
use crate::shared::constants::{ALLOWED_IMAGE_TYPES, MAX_FILE_SIZE};

const DEFAULT_FOLDER: &str = "uploads";

/// Storage file name for an upload: the client name with unsafe characters replaced,
/// or a generated `{uuid}.{ext}` when nothing usable remains
fn storage_file_name(original: Option<&str>, content_type: &str) -> String {
    let sanitized: String = original
        .unwrap_or_default()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        let extension = extension_for_content_type(content_type).unwrap_or("bin");
        format!("{}.{}", Uuid::now_v7(), extension)
    } else {
        sanitized
    }
}

/// Admin file operations over the configured object store
pub struct FileService {
    storage: Arc<dyn ObjectStore>,
}

impl FileService {
    pub fn new(storage: Arc<dyn ObjectStore>) -> Self {
        Self { storage }
    }

    pub fn bucket(&self) -> &str {
        self.storage.bucket()
    }

    /// Validate and store an uploaded image under `folder`
    pub async fn upload(
        &self,
        data: Vec<u8>,
        file_name: Option<&str>,
        content_type: &str,
        folder: Option<&str>,
        overwrite: bool,
    ) -> Result<StoredFile> {
        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let folder = folder
            .map(|f| f.trim_matches('/'))
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FOLDER);
        let path = format!("{}/{}", folder, storage_file_name(file_name, content_type));

        let stored = self
            .storage
            .upload(&path, data, content_type, UploadOptions { overwrite })
            .await?;

        info!("File uploaded: path={}, size={}", stored.path, stored.size);
        Ok(stored)
    }

    pub async fn list(&self, folder: Option<&str>) -> Result<Vec<FileDescriptor>> {
        self.storage.list(folder.unwrap_or_default()).await
    }

    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        self.storage.download(path).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.storage.delete(path).await?;
        info!("File deleted: path={}", path);
        Ok(())
    }
}
