/// Maximum length (in characters) of a post excerpt, also the derived-excerpt cut
pub const MAX_EXCERPT_LENGTH: usize = 200;

/// Maximum upload size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Image MIME types accepted by the admin upload endpoint
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Header carrying the admin session token (`Bearer <token>`)
pub const BEARER_PREFIX: &str = "Bearer ";
