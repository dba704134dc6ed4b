use std::sync::Arc;

use tracing::info;

use crate::core::error::Result;
use crate::features::brands::dtos::{BrandResponseDto, CreateBrandDto, UpdateBrandDto};
use crate::features::brands::models::Brand;
use crate::features::brands::repositories::BrandRepository;
use crate::shared::validation::validate_fields;

fn normalize_website(website: Option<String>) -> Option<String> {
    website.filter(|w| !w.trim().is_empty())
}

/// Service for brand operations
pub struct BrandService {
    repo: Arc<dyn BrandRepository>,
}

impl BrandService {
    pub fn new(repo: Arc<dyn BrandRepository>) -> Self {
        Self { repo }
    }

    /// List all brands in the order they were first created
    pub async fn list(&self) -> Result<Vec<BrandResponseDto>> {
        let brands = self.repo.list().await?;
        Ok(brands.into_iter().map(|b| b.into()).collect())
    }

    pub async fn get(&self, name: &str) -> Result<BrandResponseDto> {
        Ok(self.repo.get(name).await?.into())
    }

    /// Create a brand. A brand with the same name is overwritten (last write wins).
    pub async fn create(&self, mut dto: CreateBrandDto) -> Result<BrandResponseDto> {
        dto.website = normalize_website(dto.website);
        validate_fields(&dto)?;

        let brand = self
            .repo
            .upsert(Brand {
                name: dto.name,
                description: dto.description,
                images: dto.images,
                website: dto.website,
            })
            .await?;

        info!("Brand saved: name={:?}", brand.name);
        Ok(brand.into())
    }

    /// Merge `dto` into the stored brand and re-validate the result
    pub async fn update(&self, name: &str, dto: UpdateBrandDto) -> Result<BrandResponseDto> {
        let existing = self.repo.get(name).await?;

        let merged = CreateBrandDto {
            name: existing.name,
            description: dto.description.unwrap_or(existing.description),
            images: dto.images.unwrap_or(existing.images),
            website: match dto.website {
                Some(website) => normalize_website(Some(website)),
                None => existing.website,
            },
        };
        validate_fields(&merged)?;

        let brand = self
            .repo
            .update(Brand {
                name: merged.name,
                description: merged.description,
                images: merged.images,
                website: merged.website,
            })
            .await?;

        info!("Brand updated: name={:?}", brand.name);
        Ok(brand.into())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.repo.delete(name).await?;
        info!("Brand deleted: name={:?}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::brands::repositories::MemoryBrandRepository;

    fn service() -> BrandService {
        BrandService::new(Arc::new(MemoryBrandRepository::new()))
    }

    fn create_dto(name: &str, description: &str) -> CreateBrandDto {
        CreateBrandDto {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service
            .create(CreateBrandDto {
                images: vec!["data:image/png;base64,iVBORw0KGgo=".to_string()],
                website: Some("https://arlette.example.com".to_string()),
                ..create_dto("Arlette", "Parisian leather goods")
            })
            .await
            .unwrap();

        assert_eq!(service.get("Arlette").await.unwrap(), created);
        assert_eq!(created.website.as_deref(), Some("https://arlette.example.com"));
    }

    #[tokio::test]
    async fn test_duplicate_name_overwrites_in_place() {
        let service = service();
        service.create(create_dto("Arlette", "first")).await.unwrap();
        service.create(create_dto("Bellamy", "watches")).await.unwrap();
        service.create(create_dto("Arlette", "second")).await.unwrap();

        let brands = service.list().await.unwrap();
        let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Arlette", "Bellamy"]);
        assert_eq!(brands[0].description, "second");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let service = service();
        let err = service
            .create(CreateBrandDto {
                website: Some("not a url".to_string()),
                ..create_dto(" ", "")
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.fields(),
            &[
                "description".to_string(),
                "name".to_string(),
                "website".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_update_merges_and_clears_website() {
        let service = service();
        service
            .create(CreateBrandDto {
                website: Some("https://arlette.example.com".to_string()),
                ..create_dto("Arlette", "first")
            })
            .await
            .unwrap();

        let updated = service
            .update(
                "Arlette",
                UpdateBrandDto {
                    images: Some(vec!["https://host/blogs/brands/a.png".to_string()]),
                    website: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "first");
        assert_eq!(updated.images, vec!["https://host/blogs/brands/a.png"]);
        assert_eq!(updated.website, None);
    }

    #[tokio::test]
    async fn test_missing_brand_is_not_found() {
        let service = service();
        assert!(matches!(
            service.get("Nobody").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update("Nobody", UpdateBrandDto::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete("Nobody").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_list_empty() {
        let service = service();
        service.create(create_dto("Arlette", "first")).await.unwrap();
        service.delete("Arlette").await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
