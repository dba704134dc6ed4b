use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::posts::dtos::{CreatePostDto, PostResponseDto, UpdatePostDto};
use crate::features::posts::models::{NewPost, Post};
use crate::features::posts::repositories::PostRepository;
use crate::features::posts::services::{CleanupReport, MediaJanitor};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::MAX_EXCERPT_LENGTH;
use crate::shared::validation::validate_fields;

/// Derive an excerpt from post content: the first 200 characters of the trimmed content
pub fn derive_excerpt(content: &str) -> String {
    content
        .trim()
        .chars()
        .take(MAX_EXCERPT_LENGTH)
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn resolve_excerpt(excerpt: Option<String>, content: &str) -> String {
    match excerpt {
        Some(e) if !e.trim().is_empty() => e,
        _ => derive_excerpt(content),
    }
}

/// Service for post operations
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    janitor: MediaJanitor,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, storage: Arc<dyn ObjectStore>) -> Self {
        Self {
            repo,
            janitor: MediaJanitor::new(storage),
        }
    }

    /// List all posts, most recently published first
    pub async fn list(&self) -> Result<Vec<PostResponseDto>> {
        let posts = self.repo.list().await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<PostResponseDto> {
        Ok(self.repo.get(id).await?.into())
    }

    /// Validate and store a new post, filling in the excerpt and publication time
    pub async fn create(&self, dto: CreatePostDto) -> Result<PostResponseDto> {
        validate_fields(&dto)?;

        let excerpt = resolve_excerpt(dto.excerpt, &dto.content);
        let post = self
            .repo
            .insert(NewPost {
                title: dto.title,
                content: dto.content,
                excerpt,
                photo_urls: dto.photo_urls,
                published_at: dto.published_at.unwrap_or_else(Utc::now),
            })
            .await?;

        info!("Post created: id={}, title={:?}", post.id, post.title);
        Ok(post.into())
    }

    /// Merge `dto` into the stored post and re-validate the result.
    ///
    /// An excerpt that was derived from the old content is re-derived when the content
    /// changes and no new excerpt is given.
    pub async fn update(&self, id: Uuid, dto: UpdatePostDto) -> Result<PostResponseDto> {
        let existing = self.repo.get(id).await?;

        let excerpt_was_derived = existing.excerpt == derive_excerpt(&existing.content);
        let content_changed = dto
            .content
            .as_ref()
            .is_some_and(|c| *c != existing.content);

        let excerpt = match dto.excerpt {
            Some(e) => Some(e),
            None if excerpt_was_derived && content_changed => None,
            None => Some(existing.excerpt),
        };

        let merged = CreatePostDto {
            title: dto.title.unwrap_or(existing.title),
            content: dto.content.unwrap_or(existing.content),
            excerpt,
            photo_urls: dto.photo_urls.unwrap_or(existing.photo_urls),
            published_at: Some(dto.published_at.unwrap_or(existing.published_at)),
        };
        validate_fields(&merged)?;

        let post = self
            .repo
            .update(Post {
                id,
                excerpt: resolve_excerpt(merged.excerpt, &merged.content),
                title: merged.title,
                content: merged.content,
                photo_urls: merged.photo_urls,
                published_at: merged.published_at.unwrap_or(existing.published_at),
            })
            .await?;

        info!("Post updated: id={}", post.id);
        Ok(post.into())
    }

    /// Delete a post and, best-effort, the images it references.
    ///
    /// A missing post fails with `NotFound` before any storage call. Image cleanup failures
    /// are logged and reported but never prevent the post record from being removed.
    pub async fn delete(&self, id: Uuid) -> Result<CleanupReport> {
        let post = self.repo.get(id).await?;

        let report = self.janitor.cleanup(&post).await;
        if !report.is_clean() {
            warn!(
                "Post {} deleted with {} orphaned image(s): {:?}",
                id,
                report.failed.len(),
                report.failed
            );
        }

        self.repo.delete(id).await?;

        info!(
            "Post deleted: id={}, images_deleted={}, images_failed={}, urls_skipped={}",
            id,
            report.deleted.len(),
            report.failed.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::posts::repositories::MemoryPostRepository;
    use crate::features::posts::services::test_support::RecordingStore;
    use fake::faker::lorem::en::{Paragraph, Sentence};
    use fake::Fake;

    fn service_with(store: Arc<RecordingStore>) -> PostService {
        PostService::new(Arc::new(MemoryPostRepository::new()), store)
    }

    fn service() -> (PostService, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::new("blogs"));
        (service_with(store.clone()), store)
    }

    fn create_dto(title: &str, content: &str, photo_urls: &[&str]) -> CreatePostDto {
        CreatePostDto {
            title: title.to_string(),
            content: content.to_string(),
            photo_urls: photo_urls.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_excerpt() {
        assert_eq!(derive_excerpt("  short body \n"), "short body");

        let long = "a".repeat(150) + " " + &"b".repeat(150);
        let excerpt = derive_excerpt(&long);
        assert_eq!(excerpt.chars().count(), 200);
        assert!(long.starts_with(&excerpt));

        // multi-byte characters are counted, not bytes
        let accents = "é".repeat(300);
        assert_eq!(derive_excerpt(&accents).chars().count(), 200);
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input_plus_defaults() {
        let (service, _) = service();

        for _ in 0..10 {
            let title: String = Sentence(2..6).fake();
            let content: String = Paragraph(1..4).fake();
            let dto = create_dto(&title, &content, &["https://host/blogs/a.jpg"]);

            let before = Utc::now();
            let created = service.create(dto).await.unwrap();
            let fetched = service.get(created.id).await.unwrap();

            assert_eq!(created, fetched);
            assert_eq!(fetched.title, title);
            assert_eq!(fetched.content, content);
            assert_eq!(fetched.excerpt, derive_excerpt(&content));
            assert_eq!(fetched.photo_urls, vec!["https://host/blogs/a.jpg"]);
            assert!(fetched.published_at >= before);
        }
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_excerpt_and_date() {
        let (service, _) = service();
        let published_at: chrono::DateTime<Utc> = "2024-03-01T10:00:00Z".parse().unwrap();
        let created = service
            .create(CreatePostDto {
                excerpt: Some("Teaser".to_string()),
                published_at: Some(published_at),
                ..create_dto("Hello", "World", &[])
            })
            .await
            .unwrap();

        assert_eq!(created.excerpt, "Teaser");
        assert_eq!(created.published_at, published_at);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let (service, _) = service();

        let err = service.create(create_dto("", " ", &[])).await.unwrap_err();
        assert_eq!(err.fields(), &["content".to_string(), "title".to_string()]);

        let err = service
            .create(create_dto(&"t".repeat(201), "World", &[]))
            .await
            .unwrap_err();
        assert_eq!(err.fields(), &["title".to_string()]);

        let err = service
            .create(CreatePostDto {
                excerpt: Some("e".repeat(201)),
                ..create_dto("Hello", "World", &[""])
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.fields(),
            &["excerpt".to_string(), "photo_urls".to_string()]
        );

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let (service, _) = service();
        assert_eq!(service.list().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let (service, _) = service();
        let created = service
            .create(create_dto("Hello", "World", &["https://host/blogs/a.jpg"]))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdatePostDto {
                    title: Some("Hello again".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Hello again");
        assert_eq!(updated.content, "World");
        assert_eq!(updated.photo_urls, created.photo_urls);
        assert_eq!(updated.published_at, created.published_at);
        assert_eq!(service.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_rederives_only_derived_excerpts() {
        let (service, _) = service();
        let derived = service.create(create_dto("A", "First body", &[])).await.unwrap();
        let custom = service
            .create(CreatePostDto {
                excerpt: Some("Hand written".to_string()),
                ..create_dto("B", "First body", &[])
            })
            .await
            .unwrap();

        let change = UpdatePostDto {
            content: Some("Second body".to_string()),
            ..Default::default()
        };
        let derived = service.update(derived.id, change.clone()).await.unwrap();
        let custom = service.update(custom.id, change).await.unwrap();

        assert_eq!(derived.excerpt, "Second body");
        assert_eq!(custom.excerpt, "Hand written");
    }

    #[tokio::test]
    async fn test_update_revalidates_and_reports_missing() {
        let (service, _) = service();
        let created = service.create(create_dto("Hello", "World", &[])).await.unwrap();

        let err = service
            .update(
                created.id,
                UpdatePostDto {
                    title: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.fields(), &["title".to_string()]);
        assert_eq!(service.get(created.id).await.unwrap().title, "Hello");

        let err = service
            .update(Uuid::now_v7(), UpdatePostDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_reaps_bucket_images() {
        let (service, store) = service();
        let created = service
            .create(create_dto("Hello", "World", &["https://host/blogs/2024/1/abc.jpg"]))
            .await
            .unwrap();

        let report = service.delete(created.id).await.unwrap();

        assert_eq!(store.deleted_paths(), vec!["2024/1/abc.jpg"]);
        assert_eq!(report.deleted, vec!["2024/1/abc.jpg"]);
        assert!(matches!(
            service.get(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_every_storage_delete_fails() {
        let store = Arc::new(RecordingStore::new("blogs").failing_always());
        let service = service_with(store.clone());
        let urls = [
            "https://host/blogs/2024/1/a.jpg",
            "https://host/blogs/2024/1/b.jpg",
            "https://cdn.other.com/c.jpg",
        ];
        let created = service.create(create_dto("Hello", "World", &urls)).await.unwrap();

        let report = service.delete(created.id).await.unwrap();

        let mut calls = store.deleted_paths();
        calls.sort();
        assert_eq!(calls, vec!["2024/1/a.jpg", "2024/1/b.jpg"]);
        assert_eq!(report.failed.len(), 2);
        assert!(report.deleted.is_empty());
        assert_eq!(report.skipped, vec!["https://cdn.other.com/c.jpg"]);
        assert!(matches!(
            service.get(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_post_skips_cleanup() {
        let (service, store) = service();

        let err = service.delete(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.deleted_paths().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_deletes_of_same_post() {
        let (service, _) = service();
        let service = Arc::new(service);
        let created = service.create(create_dto("Hello", "World", &[])).await.unwrap();

        let (first, second) = tokio::join!(service.delete(created.id), service.delete(created.id));

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::NotFound(_)))));
        assert!(service.list().await.unwrap().is_empty());
    }
}
