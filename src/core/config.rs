use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::shared::validation::STORAGE_SEGMENT_REGEX;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendKind,
    /// Only present for the remote backend
    pub database: Option<DatabaseConfig>,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub swagger: SwaggerConfig,
}

/// Which pair of content stores the process runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// In-process repositories and object store (development / demo content)
    #[default]
    Local,
    /// Postgres document store + MinIO/S3 object store
    Remote,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "mock" => Ok(BackendKind::Local),
            "remote" | "postgres" => Ok(BackendKind::Remote),
            other => Err(format!(
                "CONTENT_BACKEND must be 'local' or 'remote', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Object storage configuration.
///
/// The bucket and public endpoint apply to both backends; the MinIO credentials are
/// only read when the remote backend is selected.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket (namespace) holding uploaded images
    pub bucket: String,
    /// Base endpoint used to derive public URLs for the in-memory store
    pub local_public_endpoint: String,
    pub minio: MinIOConfig,
}

/// MinIO/S3 storage configuration for file uploads
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for publicly accessible files (optional, defaults to endpoint)
    pub public_endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
}

#[derive(Clone)]
pub struct AdminConfig {
    pub password: String,
    pub session_ttl: Duration,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"***")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let backend = env::var("CONTENT_BACKEND")
            .ok()
            .map(|v| v.parse::<BackendKind>())
            .transpose()?
            .unwrap_or_default();

        let database = match backend {
            BackendKind::Remote => Some(DatabaseConfig::from_env()?),
            BackendKind::Local => None,
        };

        Ok(Config {
            app: AppConfig::from_env()?,
            backend,
            database,
            storage: StorageConfig::from_env()?,
            admin: AdminConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set for the remote backend".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

/// The bucket is matched against a single URL path segment when extracting storage paths
fn validate_bucket(bucket: &str) -> Result<(), String> {
    if bucket == "." || bucket == ".." || !STORAGE_SEGMENT_REGEX.is_match(bucket) {
        return Err(format!(
            "STORAGE_BUCKET '{}' must be a single path segment of letters, digits, '.', '_' or '-'",
            bucket
        ));
    }
    Ok(())
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "blogs".to_string());
        validate_bucket(&bucket)?;

        let local_public_endpoint = env::var("STORAGE_PUBLIC_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:3000/media".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            bucket,
            local_public_endpoint,
            minio: MinIOConfig::from_env()?,
        })
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env::var("MINIO_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:9000".to_string())
            .trim_end_matches('/')
            .to_string();

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint = env::var("MINIO_PUBLIC_ENDPOINT")
            .map(|e| e.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            region,
        })
    }
}

impl AdminConfig {
    const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 3600;

    pub fn from_env() -> Result<Self, String> {
        let password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "ADMIN_PASSWORD environment variable is required".to_string())?;

        let session_ttl_secs = env::var("ADMIN_SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ADMIN_SESSION_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            password,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Atelier Content API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Posts, brands, jobs and media for the Atelier site".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("local".parse::<BackendKind>(), Ok(BackendKind::Local));
        assert_eq!(" Remote ".parse::<BackendKind>(), Ok(BackendKind::Remote));
        assert_eq!("postgres".parse::<BackendKind>(), Ok(BackendKind::Remote));
        assert!("firebase".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::default(), BackendKind::Local);
    }

    #[test]
    fn test_bucket_must_be_one_segment() {
        assert!(validate_bucket("blogs").is_ok());
        assert!(validate_bucket("media-v2_prod").is_ok());
        for bad in ["", " ", "blogs/2024", "my bucket", "..", ".", "blogs?x=1"] {
            assert!(validate_bucket(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }
}
