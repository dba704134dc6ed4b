use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::posts::dtos::{
    CreatePostDto, DeletePostResponseDto, PostResponseDto, UpdatePostDto,
};
use crate::features::posts::services::PostService;
use crate::shared::types::ApiResponse;

/// List posts, most recently published first
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "List of posts (possibly empty)", body = ApiResponse<Vec<PostResponseDto>>),
    ),
    tag = "posts"
)]
pub async fn list_posts(
    State(service): State<Arc<PostService>>,
) -> Result<Json<ApiResponse<Vec<PostResponseDto>>>> {
    let posts = service.list().await?;
    Ok(Json(ApiResponse::list(posts)))
}

/// Get a post by id
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = ApiResponse<PostResponseDto>),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let post = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/admin/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Validation error, `errors` lists the invalid fields"),
        (status = 401, description = "Admin session required")
    ),
    tag = "posts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_post(
    State(service): State<Arc<PostService>>,
    AppJson(dto): AppJson<CreatePostDto>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponseDto>>)> {
    let post = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(post),
            Some("Post created successfully".to_string()),
            None,
        )),
    ))
}

/// Update some fields of a post
#[utoipa::path(
    put,
    path = "/api/admin/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_post(
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdatePostDto>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let post = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(post),
        Some("Post updated successfully".to_string()),
        None,
    )))
}

/// Delete a post and its stored images
///
/// Image cleanup is best-effort: the post is removed even when some images could not be.
#[utoipa::path(
    delete,
    path = "/api/admin/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = ApiResponse<DeletePostResponseDto>),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_post(
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletePostResponseDto>>> {
    let report = service.delete(id).await?;

    let message = if report.is_clean() {
        "Post deleted successfully".to_string()
    } else {
        format!(
            "Post deleted; {} image(s) could not be removed",
            report.failed.len()
        )
    };

    Ok(Json(ApiResponse::success(
        Some(DeletePostResponseDto {
            deleted: true,
            images_deleted: report.deleted,
            images_failed: report.failed,
            urls_skipped: report.skipped,
        }),
        Some(message),
        None,
    )))
}
