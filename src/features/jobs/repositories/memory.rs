use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{not_found, JobRepository};
use crate::core::error::Result;
use crate::features::jobs::models::{Job, NewJob};

#[derive(Debug, Default)]
pub struct MemoryJobRepository {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn list(&self) -> Result<Vec<Job>> {
        let mut jobs = self.jobs.read().await.clone();
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(jobs)
    }

    async fn get(&self, id: Uuid) -> Result<Job> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn insert(&self, job: NewJob) -> Result<Job> {
        let job = job.with_id(Uuid::now_v7());
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn update(&self, job: Job) -> Result<Job> {
        let mut jobs = self.jobs.write().await;
        let slot = jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| not_found(job.id))?;
        *slot = job.clone();
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut jobs = self.jobs.write().await;
        let index = jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| not_found(id))?;
        jobs.remove(index);
        Ok(())
    }
}
