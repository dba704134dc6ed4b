use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::brands::handlers;
use crate::features::brands::services::BrandService;

pub fn public_routes(service: Arc<BrandService>) -> Router {
    Router::new()
        .route("/api/brands", get(handlers::list_brands))
        .route("/api/brands/{name}", get(handlers::get_brand))
        .with_state(service)
}

pub fn admin_routes(service: Arc<BrandService>) -> Router {
    Router::new()
        .route("/api/admin/brands", post(handlers::create_brand))
        .route(
            "/api/admin/brands/{name}",
            put(handlers::update_brand).delete(handlers::delete_brand),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::brands::dtos::BrandResponseDto;
    use crate::features::brands::repositories::MemoryBrandRepository;
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let service = Arc::new(BrandService::new(Arc::new(MemoryBrandRepository::new())));
        TestServer::new(public_routes(service.clone()).merge(admin_routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_brand_lifecycle() {
        let server = server();

        server
            .post("/api/admin/brands")
            .json(&json!({ "name": "Maison Arlette", "description": "Leather goods" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/brands/Maison%20Arlette").await;
        response.assert_status_ok();
        let body: ApiResponse<BrandResponseDto> = response.json();
        assert_eq!(body.data.unwrap().description, "Leather goods");

        server
            .put("/api/admin/brands/Maison%20Arlette")
            .json(&json!({ "description": "Leather and silk" }))
            .await
            .assert_status_ok();

        server
            .delete("/api/admin/brands/Maison%20Arlette")
            .await
            .assert_status_ok();

        let listing: ApiResponse<Vec<BrandResponseDto>> = server.get("/api/brands").await.json();
        assert_eq!(listing.data, Some(vec![]));
    }

    #[tokio::test]
    async fn test_unknown_brand_is_404() {
        let server = server();
        server
            .get("/api/brands/Nobody")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
