//! In-process object store used by the local backend and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::modules::storage::object_store::{
    ensure_upload_path, ensure_valid_path, folder_prefix, public_url_for, FileDescriptor,
    ObjectStore, StoredFile, UploadOptions,
};

struct MemoryObject {
    data: Vec<u8>,
    content_type: String,
    modified: DateTime<Utc>,
}

pub struct MemoryObjectStore {
    bucket: String,
    public_endpoint: String,
    objects: RwLock<BTreeMap<String, MemoryObject>>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>, public_endpoint: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_endpoint: public_endpoint.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    #[cfg(test)]
    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    /// Insert an object without upload validation, like a file written by another tool
    #[cfg(test)]
    pub async fn put_raw(&self, path: &str, data: Vec<u8>) {
        self.objects.write().await.insert(
            path.to_string(),
            MemoryObject {
                data,
                content_type: "application/octet-stream".to_string(),
                modified: Utc::now(),
            },
        );
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn public_url(&self, path: &str) -> String {
        public_url_for(&self.public_endpoint, &self.bucket, path)
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        options: UploadOptions,
    ) -> Result<StoredFile> {
        ensure_upload_path(path)?;

        let mut objects = self.objects.write().await;
        if !options.overwrite && objects.contains_key(path) {
            return Err(AppError::Conflict(format!(
                "File '{}' already exists",
                path
            )));
        }

        let size = data.len() as u64;
        objects.insert(
            path.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
                modified: Utc::now(),
            },
        );
        debug!("Stored '{}' in memory bucket '{}'", path, self.bucket);

        Ok(StoredFile {
            path: path.to_string(),
            public_url: self.public_url(path),
            bucket: self.bucket.clone(),
            size,
            content_type: content_type.to_string(),
        })
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        ensure_valid_path(path)?;
        self.objects
            .read()
            .await
            .get(path)
            .map(|object| object.data.clone())
            .ok_or_else(|| AppError::NotFound(format!("File '{}' not found", path)))
    }

    async fn list(&self, folder: &str) -> Result<Vec<FileDescriptor>> {
        let prefix = folder_prefix(folder)?;
        let objects = self.objects.read().await;

        Ok(objects
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, object)| {
                let name = &key[prefix.len()..];
                (!name.contains('/')).then(|| FileDescriptor {
                    name: name.to_string(),
                    path: key.clone(),
                    size: object.data.len() as u64,
                    modified: Some(object.modified),
                })
            })
            .collect())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        ensure_valid_path(path)?;
        if self.objects.write().await.remove(path).is_some() {
            debug!("Deleted '{}' from memory bucket '{}'", path, self.bucket);
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryObjectStore")
            .field("bucket", &self.bucket)
            .field("public_endpoint", &self.public_endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn store() -> MemoryObjectStore {
        MemoryObjectStore::new("blogs", "http://localhost:3000/media")
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let store = store();
        let file = store
            .upload("2024/1/abc.jpg", vec![1, 2, 3], "image/jpeg", UploadOptions::default())
            .await
            .unwrap();

        assert_eq!(file.public_url, "http://localhost:3000/media/blogs/2024/1/abc.jpg");
        assert_eq!(file.size, 3);
        assert_eq!(store.download("2024/1/abc.jpg").await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_upload_without_overwrite_conflicts() {
        let store = store();
        assert_ok!(
            store
                .upload("a.png", vec![1], "image/png", UploadOptions::default())
                .await
        );

        let err = store
            .upload("a.png", vec![2], "image/png", UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert_ok!(
            store
                .upload("a.png", vec![2], "image/png", UploadOptions { overwrite: true })
                .await
        );
        assert_eq!(store.download("a.png").await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_list_only_direct_children() {
        let store = store();
        for path in ["2024/1/a.jpg", "2024/1/b.jpg", "2024/2/c.jpg", "2024/top.jpg", "root.png"] {
            store
                .upload(path, vec![0; 4], "image/jpeg", UploadOptions::default())
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list("2024/1")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);

        let names: Vec<String> = store
            .list("2024/")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["top.jpg"]);

        let root = store.list("").await.unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].path, "root.png");
    }

    #[tokio::test]
    async fn test_list_empty_folder_is_empty() {
        assert!(store().list("nothing/here").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = store();
        store
            .upload("a.png", vec![1], "image/png", UploadOptions::default())
            .await
            .unwrap();

        assert_ok!(store.delete("a.png").await);
        assert!(!store.contains("a.png").await);
        assert_ok!(store.delete("a.png").await);
    }

    #[tokio::test]
    async fn test_invalid_paths_rejected() {
        let store = store();
        assert_err!(
            store
                .upload("../escape.png", vec![1], "image/png", UploadOptions::default())
                .await
        );
        assert_err!(store.delete("/abs.png").await);
        assert!(matches!(
            store.download("missing.png").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_foreign_names_download_and_delete() {
        let store = store();
        store.put_raw("2024/1/my photo.jpg", vec![7]).await;
        store.put_raw("café.jpg", vec![8]).await;

        assert_eq!(store.download("2024/1/my photo.jpg").await.unwrap(), vec![7]);
        assert_ok!(store.delete("2024/1/my photo.jpg").await);
        assert_ok!(store.delete("café.jpg").await);
        assert!(!store.contains("2024/1/my photo.jpg").await);
        assert!(!store.contains("café.jpg").await);

        // Writes still use the generated-name charset
        assert!(matches!(
            store
                .upload("my photo.jpg", vec![1], "image/jpeg", UploadOptions::default())
                .await,
            Err(AppError::BadRequest(_))
        ));
    }
}
