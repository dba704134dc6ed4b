use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::jobs::dtos::{CreateJobDto, JobResponseDto, UpdateJobDto};
use crate::features::jobs::models::{Job, NewJob};
use crate::features::jobs::repositories::JobRepository;
use crate::shared::validation::validate_fields;

/// Service for job listing operations
pub struct JobService {
    repo: Arc<dyn JobRepository>,
}

impl JobService {
    pub fn new(repo: Arc<dyn JobRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<JobResponseDto>> {
        let jobs = self.repo.list().await?;
        Ok(jobs.into_iter().map(|j| j.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<JobResponseDto> {
        Ok(self.repo.get(id).await?.into())
    }

    pub async fn create(&self, dto: CreateJobDto) -> Result<JobResponseDto> {
        validate_fields(&dto)?;

        let job = self
            .repo
            .insert(NewJob {
                title: dto.title,
                location: dto.location,
                department: dto.department,
                description: dto.description,
                requirements: dto.requirements,
                posted_at: dto.posted_at.unwrap_or_else(Utc::now),
            })
            .await?;

        info!("Job created: id={}, title={:?}", job.id, job.title);
        Ok(job.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateJobDto) -> Result<JobResponseDto> {
        let existing = self.repo.get(id).await?;

        let merged = CreateJobDto {
            title: dto.title.unwrap_or(existing.title),
            location: dto.location.unwrap_or(existing.location),
            department: dto.department.unwrap_or(existing.department),
            description: dto.description.unwrap_or(existing.description),
            requirements: dto.requirements.unwrap_or(existing.requirements),
            posted_at: dto.posted_at,
        };
        validate_fields(&merged)?;

        let job = self
            .repo
            .update(Job {
                id,
                title: merged.title,
                location: merged.location,
                department: merged.department,
                description: merged.description,
                requirements: merged.requirements,
                posted_at: merged.posted_at.unwrap_or(existing.posted_at),
            })
            .await?;

        info!("Job updated: id={}", job.id);
        Ok(job.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await?;
        info!("Job deleted: id={}", id);
        Ok(())
    }
}
