use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::core::middleware::bearer_token;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, SessionStatusDto};
use crate::features::auth::models::AdminSession;
use crate::features::auth::services::AdminSessionService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::validate_fields;

/// Exchange the admin secret for a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid secret")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AdminSessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    validate_fields(&dto)?;

    let session = service
        .login(&dto.secret)
        .await
        .ok_or_else(|| AppError::Unauthorized("Invalid secret".to_string()))?;

    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

/// Report whether the request carries a live admin session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session status", body = ApiResponse<SessionStatusDto>)
    ),
    tag = "auth",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn session_status(
    State(service): State<Arc<AdminSessionService>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<SessionStatusDto>>> {
    let authenticated = match bearer_token(&headers) {
        Some(token) => service.is_authenticated(token).await,
        None => false,
    };
    Ok(Json(ApiResponse::success(
        Some(SessionStatusDto { authenticated }),
        None,
        None,
    )))
}

/// End the current admin session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Admin session required")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    session: AdminSession,
    State(service): State<Arc<AdminSessionService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.logout(&session.token).await;
    Ok(Json(ApiResponse::success(
        None,
        Some("Logged out".to_string()),
        None,
    )))
}
