//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services (object storage).

pub mod storage;
