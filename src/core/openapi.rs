use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::brands::{dtos as brands_dtos, handlers as brands_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::jobs::{dtos as jobs_dtos, handlers as jobs_handlers};
use crate::features::posts::{dtos as posts_dtos, handlers as posts_handlers};
use crate::modules::storage::{FileDescriptor, StoredFile};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::session_status,
        auth_handlers::logout,
        // Posts
        posts_handlers::list_posts,
        posts_handlers::get_post,
        posts_handlers::create_post,
        posts_handlers::update_post,
        posts_handlers::delete_post,
        // Brands
        brands_handlers::list_brands,
        brands_handlers::get_brand,
        brands_handlers::create_brand,
        brands_handlers::update_brand,
        brands_handlers::delete_brand,
        // Jobs
        jobs_handlers::list_jobs,
        jobs_handlers::get_job,
        jobs_handlers::create_job,
        jobs_handlers::update_job,
        jobs_handlers::delete_job,
        // Files
        files_handlers::upload_file,
        files_handlers::list_files,
        files_handlers::download_file,
        files_handlers::delete_file,
        files_handlers::serve_media,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::SessionStatusDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            ApiResponse<auth_dtos::SessionStatusDto>,
            // Posts
            posts_dtos::CreatePostDto,
            posts_dtos::UpdatePostDto,
            posts_dtos::PostResponseDto,
            posts_dtos::DeletePostResponseDto,
            ApiResponse<posts_dtos::PostResponseDto>,
            ApiResponse<Vec<posts_dtos::PostResponseDto>>,
            ApiResponse<posts_dtos::DeletePostResponseDto>,
            // Brands
            brands_dtos::CreateBrandDto,
            brands_dtos::UpdateBrandDto,
            brands_dtos::BrandResponseDto,
            brands_dtos::DeleteBrandResponseDto,
            ApiResponse<brands_dtos::BrandResponseDto>,
            ApiResponse<Vec<brands_dtos::BrandResponseDto>>,
            ApiResponse<brands_dtos::DeleteBrandResponseDto>,
            // Jobs
            jobs_dtos::CreateJobDto,
            jobs_dtos::UpdateJobDto,
            jobs_dtos::JobResponseDto,
            jobs_dtos::DeleteJobResponseDto,
            ApiResponse<jobs_dtos::JobResponseDto>,
            ApiResponse<Vec<jobs_dtos::JobResponseDto>>,
            ApiResponse<jobs_dtos::DeleteJobResponseDto>,
            // Files
            files_dtos::UploadFileDto,
            files_dtos::DeleteFileDto,
            files_dtos::DeleteFileResponseDto,
            StoredFile,
            FileDescriptor,
            ApiResponse<StoredFile>,
            ApiResponse<Vec<FileDescriptor>>,
            ApiResponse<files_dtos::DeleteFileResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin session login and logout"),
        (name = "posts", description = "Blog and news posts"),
        (name = "brands", description = "Represented brands"),
        (name = "jobs", description = "Career listings"),
        (name = "files", description = "Image upload and storage"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Atelier API",
        version = "0.1.0",
        description = "Content API for the Atelier consulting site",
    )
)]
pub struct ApiDoc;

/// Adds the admin session bearer scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
