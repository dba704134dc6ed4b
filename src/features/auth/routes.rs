use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::core::middleware::admin_auth_middleware;
use crate::features::auth::handlers;
use crate::features::auth::services::AdminSessionService;

/// Login and session status (no session required)
pub fn public_routes(service: Arc<AdminSessionService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/session", get(handlers::session_status))
        .with_state(service)
}

/// Logout (session required)
pub fn protected_routes(service: Arc<AdminSessionService>) -> Router {
    Router::new()
        .route("/api/auth/logout", post(handlers::logout))
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            admin_auth_middleware,
        ))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::dtos::{LoginResponseDto, SessionStatusDto};
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::time::Duration;

    fn server() -> TestServer {
        let service = Arc::new(AdminSessionService::new(
            "open-sesame".to_string(),
            Duration::from_secs(60),
        ));
        TestServer::new(public_routes(service.clone()).merge(protected_routes(service))).unwrap()
    }

    async fn session_status(server: &TestServer, token: &str) -> bool {
        let body: ApiResponse<SessionStatusDto> = server
            .get("/api/auth/session")
            .authorization_bearer(token)
            .await
            .json();
        body.data.map(|d| d.authenticated).unwrap_or(false)
    }

    #[tokio::test]
    async fn test_login_session_logout() {
        let server = server();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "secret": "open-sesame" }))
            .await;
        response.assert_status_ok();
        let body: ApiResponse<LoginResponseDto> = response.json();
        let token = body.data.unwrap().token;

        assert!(session_status(&server, &token).await);

        server
            .post("/api/auth/logout")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        assert!(!session_status(&server, &token).await);
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthorized() {
        let server = server();
        server
            .post("/api/auth/login")
            .json(&json!({ "secret": "guess" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_without_token_is_unauthorized() {
        let server = server();
        server
            .post("/api/auth/logout")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
