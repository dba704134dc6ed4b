use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::posts::models::Post;
use crate::shared::validation::{entries_not_blank, not_blank};

/// Request DTO for creating a post
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreatePostDto {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    #[schema(example = "Hello")]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "World")]
    pub content: String,

    /// Short summary; derived from the content when absent or empty
    #[validate(length(max = 200))]
    pub excerpt: Option<String>,

    /// Public URLs of previously uploaded images
    #[serde(default)]
    #[validate(custom(function = "entries_not_blank"))]
    pub photo_urls: Vec<String>,

    /// Publication time; defaults to the creation time
    pub published_at: Option<DateTime<Utc>>,
}

/// Request DTO for a partial post update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePostDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Response DTO for a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostResponseDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub photo_urls: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl From<Post> for PostResponseDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            excerpt: p.excerpt,
            photo_urls: p.photo_urls,
            published_at: p.published_at,
        }
    }
}

/// Response DTO for a post deletion, including the image cleanup outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletePostResponseDto {
    pub deleted: bool,
    /// Storage paths that were removed
    pub images_deleted: Vec<String>,
    /// Storage paths that could not be removed and may be orphaned
    pub images_failed: Vec<String>,
    /// Photo URLs that do not point into the bucket and were left alone
    pub urls_skipped: Vec<String>,
}
