use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::jobs::dtos::{CreateJobDto, DeleteJobResponseDto, JobResponseDto, UpdateJobDto};
use crate::features::jobs::services::JobService;
use crate::shared::types::ApiResponse;

/// List job openings, most recently posted first
#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "List of jobs (possibly empty)", body = ApiResponse<Vec<JobResponseDto>>),
    ),
    tag = "jobs"
)]
pub async fn list_jobs(
    State(service): State<Arc<JobService>>,
) -> Result<Json<ApiResponse<Vec<JobResponseDto>>>> {
    let jobs = service.list().await?;
    Ok(Json(ApiResponse::list(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job id")
    ),
    responses(
        (status = 200, description = "Job found", body = ApiResponse<JobResponseDto>),
        (status = 404, description = "Job not found")
    ),
    tag = "jobs"
)]
pub async fn get_job(
    State(service): State<Arc<JobService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobResponseDto>>> {
    let job = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(job), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJobDto,
    responses(
        (status = 201, description = "Job created", body = ApiResponse<JobResponseDto>),
        (status = 400, description = "Validation error, `errors` lists the invalid fields"),
        (status = 401, description = "Admin session required")
    ),
    tag = "jobs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_job(
    State(service): State<Arc<JobService>>,
    AppJson(dto): AppJson<CreateJobDto>,
) -> Result<(StatusCode, Json<ApiResponse<JobResponseDto>>)> {
    let job = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(job),
            Some("Job created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job id")
    ),
    request_body = UpdateJobDto,
    responses(
        (status = 200, description = "Job updated", body = ApiResponse<JobResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Job not found")
    ),
    tag = "jobs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_job(
    State(service): State<Arc<JobService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateJobDto>,
) -> Result<Json<ApiResponse<JobResponseDto>>> {
    let job = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(job),
        Some("Job updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job id")
    ),
    responses(
        (status = 200, description = "Job deleted", body = ApiResponse<DeleteJobResponseDto>),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Job not found")
    ),
    tag = "jobs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_job(
    State(service): State<Arc<JobService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteJobResponseDto>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteJobResponseDto { deleted: true }),
        Some("Job deleted successfully".to_string()),
        None,
    )))
}
