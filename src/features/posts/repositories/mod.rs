//! Post persistence.
//!
//! [`PostRepository`] is CRUD-only; validation, defaults and image cleanup live in
//! `PostService`.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::posts::models::{NewPost, Post};

pub use memory::MemoryPostRepository;
pub use postgres::PostgresPostRepository;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `published_at` first, ties in insertion order
    async fn list(&self) -> Result<Vec<Post>>;

    /// Returns `Err(AppError::NotFound)` if the post doesn't exist
    async fn get(&self, id: Uuid) -> Result<Post>;

    /// Store a new post and return it with its assigned id
    async fn insert(&self, post: NewPost) -> Result<Post>;

    /// Replace every field of an existing post.
    ///
    /// Returns `Err(AppError::NotFound)` if the post doesn't exist.
    async fn update(&self, post: Post) -> Result<Post>;

    /// Returns `Err(AppError::NotFound)` if the post doesn't exist
    async fn delete(&self, id: Uuid) -> Result<()>;
}

pub(crate) fn not_found(id: Uuid) -> crate::core::error::AppError {
    crate::core::error::AppError::NotFound(format!("Post '{}' not found", id))
}
