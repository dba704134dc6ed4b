use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::posts::handlers;
use crate::features::posts::services::PostService;

/// Public read-only post routes
pub fn public_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/{id}", get(handlers::get_post))
        .with_state(service)
}

/// Post management routes (mounted behind the admin session middleware)
pub fn admin_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/api/admin/posts", post(handlers::create_post))
        .route(
            "/api/admin/posts/{id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
        .with_state(service)
}
