use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{not_found, PostRepository};
use crate::core::error::Result;
use crate::features::posts::models::{NewPost, Post};

/// In-process post store.
///
/// Posts are kept in insertion order. Every mutation holds the write lock for its whole
/// duration, so concurrent callers never observe a half-applied change.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.read().await.clone();
        // stable sort keeps insertion order among equal timestamps
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn get(&self, id: Uuid) -> Result<Post> {
        self.posts
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        let post = post.with_id(Uuid::now_v7());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| not_found(post.id))?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;
        posts.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use chrono::{Duration, Utc};

    fn new_post(title: &str, published_at: chrono::DateTime<Utc>) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "body".to_string(),
            excerpt: "body".to_string(),
            photo_urls: vec![],
            published_at,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_recency_then_insertion() {
        let repo = MemoryPostRepository::new();
        let now = Utc::now();
        repo.insert(new_post("old", now - Duration::days(2))).await.unwrap();
        repo.insert(new_post("tie-first", now)).await.unwrap();
        repo.insert(new_post("tie-second", now)).await.unwrap();
        repo.insert(new_post("middle", now - Duration::days(1))).await.unwrap();

        let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["tie-first", "tie-second", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let repo = MemoryPostRepository::new();
        let id = Uuid::now_v7();
        assert!(matches!(repo.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(id).await, Err(AppError::NotFound(_))));

        let ghost = new_post("ghost", Utc::now()).with_id(id);
        assert!(matches!(repo.update(ghost).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_all_kept() {
        let repo = std::sync::Arc::new(MemoryPostRepository::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(new_post(&format!("p{}", i), Utc::now())).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(repo.list().await.unwrap().len(), 32);
    }
}
