//! Storage module for uploaded images
//!
//! Defines the [`ObjectStore`] facade plus two implementations: a MinIO/S3-compatible
//! client for the remote backend and an in-memory store for local development and tests.

mod memory;
mod minio_client;
mod object_store;

pub use memory::MemoryObjectStore;
pub use minio_client::MinIOClient;
pub use object_store::{
    extract_storage_path, FileDescriptor, ObjectStore, StoredFile, UploadOptions,
};
