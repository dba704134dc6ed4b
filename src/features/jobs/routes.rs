use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::jobs::handlers;
use crate::features::jobs::services::JobService;

pub fn public_routes(service: Arc<JobService>) -> Router {
    Router::new()
        .route("/api/jobs", get(handlers::list_jobs))
        .route("/api/jobs/{id}", get(handlers::get_job))
        .with_state(service)
}

pub fn admin_routes(service: Arc<JobService>) -> Router {
    Router::new()
        .route("/api/admin/jobs", post(handlers::create_job))
        .route(
            "/api/admin/jobs/{id}",
            put(handlers::update_job).delete(handlers::delete_job),
        )
        .with_state(service)
}
