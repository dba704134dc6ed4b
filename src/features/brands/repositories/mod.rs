mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::{AppError, Result};
use crate::features::brands::models::Brand;

pub use memory::MemoryBrandRepository;
pub use postgres::PostgresBrandRepository;

/// Brand persistence keyed by name
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// All brands in insertion order
    async fn list(&self) -> Result<Vec<Brand>>;

    async fn get(&self, name: &str) -> Result<Brand>;

    /// Insert a brand, or replace the brand with the same name (last write wins).
    ///
    /// A replaced brand keeps its position in the listing.
    async fn upsert(&self, brand: Brand) -> Result<Brand>;

    /// Replace an existing brand. Returns `Err(AppError::NotFound)` if the name is unknown.
    async fn update(&self, brand: Brand) -> Result<Brand>;

    async fn delete(&self, name: &str) -> Result<()>;
}

pub(crate) fn not_found(name: &str) -> AppError {
    AppError::NotFound(format!("Brand '{}' not found", name))
}
