use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::files::dtos::{
    content_type_for_path, DeleteFileDto, DeleteFileResponseDto, DownloadFileQuery,
    ListFilesQuery, UploadFileDto,
};
use crate::features::files::services::FileService;
use crate::modules::storage::{FileDescriptor, StoredFile};
use crate::shared::types::ApiResponse;
use crate::shared::validation::validate_fields;

/// Upload an image
///
/// Accepts multipart/form-data with:
/// - `file`: the image (required)
/// - `folder`: destination folder (optional, defaults to `uploads`)
/// - `overwrite`: `true` to replace an existing file with the same name
#[utoipa::path(
    post,
    path = "/api/admin/files/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "File uploaded", body = ApiResponse<StoredFile>),
        (status = 400, description = "Invalid file, folder or form"),
        (status = 401, description = "Admin session required"),
        (status = 409, description = "A file already exists at that path"),
        (status = 413, description = "Request body too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<StoredFile>>)> {
    let mut file: Option<(Vec<u8>, Option<String>, String)> = None;
    let mut folder: Option<String> = None;
    let mut overwrite = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file = Some((data.to_vec(), file_name, content_type));
            }
            "folder" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read folder field: {}", e))
                })?;
                folder = Some(text);
            }
            "overwrite" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read overwrite field: {}", e))
                })?;
                overwrite = matches!(text.trim().to_lowercase().as_str(), "true" | "1" | "on");
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let (data, file_name, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let stored = service
        .upload(
            data,
            file_name.as_deref(),
            &content_type,
            folder.as_deref(),
            overwrite,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(stored),
            Some("File uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// List the files directly inside a folder
#[utoipa::path(
    get,
    path = "/api/admin/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Folder listing", body = ApiResponse<Vec<FileDescriptor>>),
        (status = 400, description = "Invalid folder"),
        (status = 401, description = "Admin session required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<FileDescriptor>>>> {
    let files = service.list(query.folder.as_deref()).await?;
    Ok(Json(ApiResponse::list(files)))
}

/// Download a stored file
#[utoipa::path(
    get,
    path = "/api/admin/files/download",
    tag = "files",
    params(DownloadFileQuery),
    responses(
        (status = 200, description = "File content"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Query(query): Query<DownloadFileQuery>,
) -> Result<impl IntoResponse> {
    let data = service.download(&query.path).await?;
    let file_name: String = query
        .path
        .rsplit('/')
        .next()
        .unwrap_or("download")
        .chars()
        .map(|c| if matches!(c, '"' | '\\') { '_' } else { c })
        .collect();

    Ok((
        [
            (
                header::CONTENT_TYPE,
                content_type_for_path(&query.path).to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        data,
    ))
}

/// Delete a stored file by path. Deleting a missing file succeeds.
#[utoipa::path(
    delete,
    path = "/api/admin/files",
    tag = "files",
    request_body = DeleteFileDto,
    responses(
        (status = 200, description = "File deleted", body = ApiResponse<DeleteFileResponseDto>),
        (status = 400, description = "Invalid path"),
        (status = 401, description = "Admin session required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_file(
    State(service): State<Arc<FileService>>,
    AppJson(dto): AppJson<DeleteFileDto>,
) -> Result<Json<ApiResponse<DeleteFileResponseDto>>> {
    validate_fields(&dto)?;
    service.delete(&dto.path).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteFileResponseDto { deleted: true }),
        Some("File deleted successfully".to_string()),
        None,
    )))
}

/// Serve a stored image at its public URL
#[utoipa::path(
    get,
    path = "/media/{bucket}/{path}",
    tag = "files",
    params(
        ("bucket" = String, Path, description = "Storage bucket"),
        ("path" = String, Path, description = "Object path inside the bucket")
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 404, description = "File not found")
    )
)]
pub async fn serve_media(
    State(service): State<Arc<FileService>>,
    Path((bucket, path)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    if bucket != service.bucket() {
        return Err(AppError::NotFound(format!("File '{}' not found", path)));
    }

    let data = service.download(&path).await.map_err(|e| match e {
        AppError::BadRequest(_) => AppError::NotFound(format!("File '{}' not found", path)),
        other => other,
    })?;

    // Scripts inside served files (SVG) must not run on the API origin
    Ok((
        [
            (header::CONTENT_TYPE, content_type_for_path(&path)),
            (header::CACHE_CONTROL, "public, max-age=3600"),
            (header::CONTENT_SECURITY_POLICY, "sandbox"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        data,
    ))
}
