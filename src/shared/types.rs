use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for every API response: errors are data, not exceptions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    /// Successful listing; the total is the number of items returned.
    pub fn list(items: Vec<T>) -> ApiResponse<Vec<T>> {
        let total = items.len() as i64;
        ApiResponse {
            success: true,
            data: Some(items),
            message: None,
            meta: Some(Meta { total }),
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}
