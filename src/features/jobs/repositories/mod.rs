mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::jobs::models::{Job, NewJob};

pub use memory::MemoryJobRepository;
pub use postgres::PostgresJobRepository;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// All jobs, newest `posted_at` first, ties in insertion order
    async fn list(&self) -> Result<Vec<Job>>;

    async fn get(&self, id: Uuid) -> Result<Job>;

    async fn insert(&self, job: NewJob) -> Result<Job>;

    async fn update(&self, job: Job) -> Result<Job>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Job '{}' not found", id))
}
