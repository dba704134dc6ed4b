use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{not_found, JobRepository};
use crate::core::error::{AppError, Result};
use crate::features::jobs::models::{Job, NewJob};

const JOB_COLUMNS: &str =
    "id, title, location, department, description, requirements, posted_at";

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn list(&self) -> Result<Vec<Job>> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY posted_at DESC, seq ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list jobs: {:?}", e);
            AppError::from(e)
        })
    }

    async fn get(&self, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get job: {:?}", e);
                AppError::from(e)
            })?
            .ok_or_else(|| not_found(id))
    }

    async fn insert(&self, job: NewJob) -> Result<Job> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (title, location, department, description, requirements, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.title)
        .bind(&job.location)
        .bind(&job.department)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(job.posted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert job: {:?}", e);
            AppError::from(e)
        })
    }

    async fn update(&self, job: Job) -> Result<Job> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET title = $2, location = $3, department = $4, description = $5,
                requirements = $6, posted_at = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.location)
        .bind(&job.department)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(job.posted_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update job: {:?}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| not_found(job.id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete job: {:?}", e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
