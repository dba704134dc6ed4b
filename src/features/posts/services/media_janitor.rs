use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::features::posts::models::Post;
use crate::modules::storage::{extract_storage_path, ObjectStore};

/// Outcome of removing a post's images from the object store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Storage paths deleted
    pub deleted: Vec<String>,
    /// Storage paths whose delete call failed; these images may be orphaned
    pub failed: Vec<String>,
    /// Photo URLs that do not resolve to a path in the bucket
    pub skipped: Vec<String>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reaps the stored images referenced by a post that is being deleted.
///
/// Cleanup is best-effort: failures are logged and reported, never returned as errors.
#[derive(Clone)]
pub struct MediaJanitor {
    storage: Arc<dyn ObjectStore>,
}

impl MediaJanitor {
    pub fn new(storage: Arc<dyn ObjectStore>) -> Self {
        Self { storage }
    }

    /// Split a post's photo URLs into unique storage paths and skipped URLs
    pub fn storage_paths(&self, post: &Post) -> (Vec<String>, Vec<String>) {
        let bucket = self.storage.bucket();
        let mut paths: Vec<String> = Vec::new();
        let mut skipped = Vec::new();

        for url in &post.photo_urls {
            match extract_storage_path(url, bucket) {
                Some(path) if !paths.contains(&path) => paths.push(path),
                Some(_) => {}
                None => skipped.push(url.clone()),
            }
        }

        (paths, skipped)
    }

    /// Delete every stored image of `post`, concurrently
    pub async fn cleanup(&self, post: &Post) -> CleanupReport {
        let (paths, skipped) = self.storage_paths(post);

        for url in &skipped {
            debug!(post_id = %post.id, "Skipping photo URL outside bucket: {}", url);
        }

        let results = join_all(paths.iter().map(|path| self.storage.delete(path))).await;

        let mut report = CleanupReport {
            skipped,
            ..Default::default()
        };
        for (path, result) in paths.into_iter().zip(results) {
            match result {
                Ok(()) => report.deleted.push(path),
                Err(e) => {
                    warn!(post_id = %post.id, "Failed to delete image '{}': {}", path, e);
                    report.failed.push(path);
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::posts::services::test_support::{post_with_photos, RecordingStore};
    use crate::modules::storage::MemoryObjectStore;

    #[test]
    fn test_storage_paths_dedupes_and_skips() {
        let store = Arc::new(RecordingStore::new("blogs"));
        let janitor = MediaJanitor::new(store);
        let post = post_with_photos(&[
            "https://host/blogs/2024/1/abc.jpg",
            "https://elsewhere.com/img/logo.png",
            "https://host/blogs/2024/1/abc.jpg?cache=2",
            "https://host/blogs/2024/2/def.jpg",
        ]);

        let (paths, skipped) = janitor.storage_paths(&post);
        assert_eq!(paths, vec!["2024/1/abc.jpg", "2024/2/def.jpg"]);
        assert_eq!(skipped, vec!["https://elsewhere.com/img/logo.png"]);
    }

    #[tokio::test]
    async fn test_cleanup_continues_after_failures() {
        let store = Arc::new(RecordingStore::new("blogs").failing_on(&["2024/1/a.jpg"]));
        let janitor = MediaJanitor::new(store.clone());
        let post = post_with_photos(&[
            "https://host/blogs/2024/1/a.jpg",
            "https://host/blogs/2024/1/b.jpg",
        ]);

        let report = janitor.cleanup(&post).await;

        assert_eq!(report.failed, vec!["2024/1/a.jpg"]);
        assert_eq!(report.deleted, vec!["2024/1/b.jpg"]);
        assert!(!report.is_clean());
        assert_eq!(store.deleted_paths().len(), 2);
    }

    #[tokio::test]
    async fn test_cleanup_without_photos_issues_no_calls() {
        let store = Arc::new(RecordingStore::new("blogs"));
        let janitor = MediaJanitor::new(store.clone());

        let report = janitor.cleanup(&post_with_photos(&[])).await;

        assert_eq!(report, CleanupReport::default());
        assert!(store.deleted_paths().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_deletes_encoded_and_non_ascii_names() {
        let store = Arc::new(MemoryObjectStore::new("blogs", "http://localhost:3000/media"));
        store.put_raw("2024/1/my photo.jpg", vec![1]).await;
        store.put_raw("café.jpg", vec![2]).await;
        let janitor = MediaJanitor::new(store.clone());
        let post = post_with_photos(&[
            "https://host/blogs/2024/1/my%20photo.jpg",
            "https://host/blogs/caf%C3%A9.jpg",
        ]);

        let report = janitor.cleanup(&post).await;

        assert_eq!(report.deleted, vec!["2024/1/my photo.jpg", "café.jpg"]);
        assert!(report.skipped.is_empty());
        assert!(!store.contains("2024/1/my photo.jpg").await);
        assert!(!store.contains("café.jpg").await);
    }
}
