use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::brands::models::Brand;
use crate::shared::validation::{entries_not_blank, not_blank};

/// Request DTO for creating a brand. Creating an existing name replaces that brand.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBrandDto {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    #[schema(example = "Maison Arlette")]
    pub name: String,

    #[validate(custom(function = "not_blank"))]
    pub description: String,

    /// Hosted image URLs or base64 data URIs, in display order
    #[serde(default)]
    #[validate(custom(function = "entries_not_blank"))]
    pub images: Vec<String>,

    #[validate(url)]
    #[schema(example = "https://arlette.example.com")]
    pub website: Option<String>,
}

/// Request DTO for a partial brand update. The name cannot be changed.
///
/// An empty `website` clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBrandDto {
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub website: Option<String>,
}

/// Response DTO for a brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrandResponseDto {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub website: Option<String>,
}

impl From<Brand> for BrandResponseDto {
    fn from(b: Brand) -> Self {
        Self {
            name: b.name,
            description: b.description,
            images: b.images,
            website: b.website,
        }
    }
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBrandResponseDto {
    pub deleted: bool,
}
