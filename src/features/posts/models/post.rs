use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored blog / news post
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// Public URLs of the post's images, in display order
    pub photo_urls: Vec<String>,
    pub published_at: DateTime<Utc>,
}

/// Validated post waiting for an id from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub photo_urls: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl NewPost {
    pub fn with_id(self, id: Uuid) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            photo_urls: self.photo_urls,
            published_at: self.published_at,
        }
    }
}
