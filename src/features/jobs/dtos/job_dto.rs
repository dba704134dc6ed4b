use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::jobs::models::Job;
use crate::shared::validation::{entries_not_blank, not_blank};

/// Request DTO for creating a job listing
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateJobDto {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    #[schema(example = "Retail Operations Manager")]
    pub title: String,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    #[schema(example = "SG")]
    pub location: String,

    #[validate(length(max = 200), custom(function = "not_blank"))]
    #[schema(example = "Ops")]
    pub department: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "entries_not_blank"))]
    pub requirements: Vec<String>,

    /// Defaults to the creation time
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateJobDto {
    pub title: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub posted_at: Option<DateTime<Utc>>,
}

/// Response DTO for a job listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JobResponseDto {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub department: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: DateTime<Utc>,
}

impl From<Job> for JobResponseDto {
    fn from(j: Job) -> Self {
        Self {
            id: j.id,
            title: j.title,
            location: j.location,
            department: j.department,
            description: j.description,
            requirements: j.requirements,
            posted_at: j.posted_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteJobResponseDto {
    pub deleted: bool,
}
