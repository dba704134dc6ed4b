use async_trait::async_trait;
use sqlx::PgPool;

use super::{not_found, BrandRepository};
use crate::core::error::{AppError, Result};
use crate::features::brands::models::Brand;

/// Brand repository over the `brands` table
pub struct PostgresBrandRepository {
    pool: PgPool,
}

impl PostgresBrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandRepository for PostgresBrandRepository {
    async fn list(&self) -> Result<Vec<Brand>> {
        sqlx::query_as::<_, Brand>(
            "SELECT name, description, images, website FROM brands ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list brands: {:?}", e);
            AppError::from(e)
        })
    }

    async fn get(&self, name: &str) -> Result<Brand> {
        sqlx::query_as::<_, Brand>(
            "SELECT name, description, images, website FROM brands WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get brand: {:?}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| not_found(name))
    }

    async fn upsert(&self, brand: Brand) -> Result<Brand> {
        sqlx::query_as::<_, Brand>(
            r#"
            INSERT INTO brands (name, description, images, website)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE
            SET description = EXCLUDED.description,
                images = EXCLUDED.images,
                website = EXCLUDED.website,
                updated_at = NOW()
            RETURNING name, description, images, website
            "#,
        )
        .bind(&brand.name)
        .bind(&brand.description)
        .bind(&brand.images)
        .bind(&brand.website)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert brand: {:?}", e);
            AppError::from(e)
        })
    }

    async fn update(&self, brand: Brand) -> Result<Brand> {
        sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands
            SET description = $2, images = $3, website = $4, updated_at = NOW()
            WHERE name = $1
            RETURNING name, description, images, website
            "#,
        )
        .bind(&brand.name)
        .bind(&brand.description)
        .bind(&brand.images)
        .bind(&brand.website)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update brand: {:?}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| not_found(&brand.name))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM brands WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete brand: {:?}", e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(name));
        }
        Ok(())
    }
}
