use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers;
use crate::features::files::services::FileService;
use crate::shared::constants::MAX_FILE_SIZE;

/// Public read access to stored media
pub fn public_routes(service: Arc<FileService>) -> Router {
    Router::new()
        .route("/media/{bucket}/{*path}", get(handlers::serve_media))
        .with_state(service)
}

/// File management routes (mounted behind the admin session middleware)
pub fn admin_routes(service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/api/admin/files/upload",
            // headroom for multipart framing
            post(handlers::upload_file).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/admin/files",
            get(handlers::list_files).delete(handlers::delete_file),
        )
        .route("/api/admin/files/download", get(handlers::download_file))
        .with_state(service)
}
