use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::models::AdminSession;
use crate::shared::validation::not_blank;

/// Request DTO for admin login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(custom(function = "not_blank"))]
    pub secret: String,
}

/// Response DTO for admin login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Bearer token for `/api/admin/*` requests
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSession> for LoginResponseDto {
    fn from(s: AdminSession) -> Self {
        Self {
            token: s.token,
            expires_at: s.expires_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusDto {
    pub authenticated: bool,
}
