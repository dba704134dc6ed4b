use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{not_found, PostRepository};
use crate::core::error::{AppError, Result};
use crate::features::posts::models::{NewPost, Post};

const POST_COLUMNS: &str = "id, title, content, excerpt, photo_urls, published_at";

/// Post repository over the `posts` table
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY published_at DESC, seq ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list posts: {:?}", e);
            AppError::from(e)
        })
    }

    async fn get(&self, id: Uuid) -> Result<Post> {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get post: {:?}", e);
                AppError::from(e)
            })?
            .ok_or_else(|| not_found(id))
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (title, content, excerpt, photo_urls, published_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.photo_urls)
        .bind(post.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert post: {:?}", e);
            AppError::from(e)
        })
    }

    async fn update(&self, post: Post) -> Result<Post> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = $2, content = $3, excerpt = $4, photo_urls = $5, published_at = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.photo_urls)
        .bind(post.published_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update post: {:?}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| not_found(post.id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete post: {:?}", e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
