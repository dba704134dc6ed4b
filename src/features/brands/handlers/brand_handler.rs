use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::brands::dtos::{
    BrandResponseDto, CreateBrandDto, DeleteBrandResponseDto, UpdateBrandDto,
};
use crate::features::brands::services::BrandService;
use crate::shared::types::ApiResponse;

/// List brands
#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "List of brands (possibly empty)", body = ApiResponse<Vec<BrandResponseDto>>),
    ),
    tag = "brands"
)]
pub async fn list_brands(
    State(service): State<Arc<BrandService>>,
) -> Result<Json<ApiResponse<Vec<BrandResponseDto>>>> {
    let brands = service.list().await?;
    Ok(Json(ApiResponse::list(brands)))
}

/// Get a brand by name
#[utoipa::path(
    get,
    path = "/api/brands/{name}",
    params(
        ("name" = String, Path, description = "Brand name")
    ),
    responses(
        (status = 200, description = "Brand found", body = ApiResponse<BrandResponseDto>),
        (status = 404, description = "Brand not found")
    ),
    tag = "brands"
)]
pub async fn get_brand(
    State(service): State<Arc<BrandService>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<BrandResponseDto>>> {
    let brand = service.get(&name).await?;
    Ok(Json(ApiResponse::success(Some(brand), None, None)))
}

/// Create a brand, replacing any brand with the same name
#[utoipa::path(
    post,
    path = "/api/admin/brands",
    request_body = CreateBrandDto,
    responses(
        (status = 201, description = "Brand saved", body = ApiResponse<BrandResponseDto>),
        (status = 400, description = "Validation error, `errors` lists the invalid fields"),
        (status = 401, description = "Admin session required")
    ),
    tag = "brands",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_brand(
    State(service): State<Arc<BrandService>>,
    AppJson(dto): AppJson<CreateBrandDto>,
) -> Result<(StatusCode, Json<ApiResponse<BrandResponseDto>>)> {
    let brand = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(brand),
            Some("Brand saved successfully".to_string()),
            None,
        )),
    ))
}

/// Update some fields of a brand
#[utoipa::path(
    put,
    path = "/api/admin/brands/{name}",
    params(
        ("name" = String, Path, description = "Brand name")
    ),
    request_body = UpdateBrandDto,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<BrandResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Brand not found")
    ),
    tag = "brands",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_brand(
    State(service): State<Arc<BrandService>>,
    Path(name): Path<String>,
    AppJson(dto): AppJson<UpdateBrandDto>,
) -> Result<Json<ApiResponse<BrandResponseDto>>> {
    let brand = service.update(&name, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(brand),
        Some("Brand updated successfully".to_string()),
        None,
    )))
}

/// Delete a brand
#[utoipa::path(
    delete,
    path = "/api/admin/brands/{name}",
    params(
        ("name" = String, Path, description = "Brand name")
    ),
    responses(
        (status = 200, description = "Brand deleted", body = ApiResponse<DeleteBrandResponseDto>),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Brand not found")
    ),
    tag = "brands",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_brand(
    State(service): State<Arc<BrandService>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<DeleteBrandResponseDto>>> {
    service.delete(&name).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteBrandResponseDto { deleted: true }),
        Some("Brand deleted successfully".to_string()),
        None,
    )))
}
