use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{not_found, BrandRepository};
use crate::core::error::Result;
use crate::features::brands::models::Brand;

/// In-process brand store, kept in insertion order
#[derive(Debug, Default)]
pub struct MemoryBrandRepository {
    brands: RwLock<Vec<Brand>>,
}

impl MemoryBrandRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BrandRepository for MemoryBrandRepository {
    async fn list(&self) -> Result<Vec<Brand>> {
        Ok(self.brands.read().await.clone())
    }

    async fn get(&self, name: &str) -> Result<Brand> {
        self.brands
            .read()
            .await
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    async fn upsert(&self, brand: Brand) -> Result<Brand> {
        let mut brands = self.brands.write().await;
        match brands.iter_mut().find(|b| b.name == brand.name) {
            Some(slot) => *slot = brand.clone(),
            None => brands.push(brand.clone()),
        }
        Ok(brand)
    }

    async fn update(&self, brand: Brand) -> Result<Brand> {
        let mut brands = self.brands.write().await;
        let slot = brands
            .iter_mut()
            .find(|b| b.name == brand.name)
            .ok_or_else(|| not_found(&brand.name))?;
        *slot = brand.clone();
        Ok(brand)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let mut brands = self.brands.write().await;
        let index = brands
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| not_found(name))?;
        brands.remove(index);
        Ok(())
    }
}
