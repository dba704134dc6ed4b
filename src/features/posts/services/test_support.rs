//! Test doubles shared by the post service tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::posts::models::Post;
use crate::modules::storage::{FileDescriptor, ObjectStore, StoredFile, UploadOptions};

/// Object store that records every delete call and fails the configured paths
pub struct RecordingStore {
    bucket: String,
    failing: HashSet<String>,
    fail_all: bool,
    deleted: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            failing: HashSet::new(),
            fail_all: false,
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, paths: &[&str]) -> Self {
        self.failing = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn failing_always(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Paths passed to `delete`, in call order
    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://host/{}/{}", self.bucket, path)
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        _options: UploadOptions,
    ) -> Result<StoredFile> {
        Ok(StoredFile {
            path: path.to_string(),
            public_url: self.public_url(path),
            bucket: self.bucket.clone(),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        Err(AppError::NotFound(path.to_string()))
    }

    async fn list(&self, _folder: &str) -> Result<Vec<FileDescriptor>> {
        Ok(vec![])
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(path.to_string());
        if self.fail_all || self.failing.contains(path) {
            return Err(AppError::Backend(format!("storage unavailable for {}", path)));
        }
        Ok(())
    }
}

pub fn post_with_photos(urls: &[&str]) -> Post {
    Post {
        id: Uuid::now_v7(),
        title: "Hello".to_string(),
        content: "World".to_string(),
        excerpt: "World".to_string(),
        photo_urls: urls.iter().map(|u| u.to_string()).collect(),
        published_at: Utc::now(),
    }
}
