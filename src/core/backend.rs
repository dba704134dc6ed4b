//! Selection of the content stores the service runs against.

use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::StorageConfig;
use crate::features::brands::{BrandRepository, MemoryBrandRepository, PostgresBrandRepository};
use crate::features::jobs::{JobRepository, MemoryJobRepository, PostgresJobRepository};
use crate::features::posts::{MemoryPostRepository, PostRepository, PostgresPostRepository};
use crate::modules::storage::{MemoryObjectStore, MinIOClient, ObjectStore};

/// One repository per entity kind plus the object store holding their images.
///
/// Both constructors yield the same interface, so services never know which backend is live.
#[derive(Clone)]
pub struct ContentBackend {
    pub posts: Arc<dyn PostRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub storage: Arc<dyn ObjectStore>,
}

impl ContentBackend {
    /// In-process stores. Content lives only as long as the process.
    pub fn local(storage: &StorageConfig) -> Self {
        Self {
            posts: Arc::new(MemoryPostRepository::new()),
            brands: Arc::new(MemoryBrandRepository::new()),
            jobs: Arc::new(MemoryJobRepository::new()),
            storage: Arc::new(MemoryObjectStore::new(
                storage.bucket.clone(),
                storage.local_public_endpoint.clone(),
            )),
        }
    }

    /// Postgres document store plus MinIO/S3 object store
    pub fn remote(pool: PgPool, storage: MinIOClient) -> Self {
        Self {
            posts: Arc::new(PostgresPostRepository::new(pool.clone())),
            brands: Arc::new(PostgresBrandRepository::new(pool.clone())),
            jobs: Arc::new(PostgresJobRepository::new(pool)),
            storage: Arc::new(storage),
        }
    }
}
