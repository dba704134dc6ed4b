use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Career listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub department: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub location: String,
    pub department: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: DateTime<Utc>,
}

impl NewJob {
    pub fn with_id(self, id: Uuid) -> Job {
        Job {
            id,
            title: self.title,
            location: self.location,
            department: self.department,
            description: self.description,
            requirements: self.requirements,
            posted_at: self.posted_at,
        }
    }
}
