use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Regex for a single object-storage path segment
    /// - Valid: "2024", "abc.jpg", "hero-banner_v2.webp"
    /// - Invalid: "", "a b.jpg", "café.png", "a/b"
    pub static ref STORAGE_SEGMENT_REGEX: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

/// Validate a DTO and turn failures into `AppError::Validation` with sorted field names
pub fn validate_fields<T: Validate>(dto: &T) -> Result<()> {
    dto.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::Validation(fields)
    })
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Rejects lists containing an empty or whitespace-only entry
pub fn entries_not_blank(values: &[String]) -> std::result::Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("blank_entry"));
    }
    Ok(())
}

/// Check that a storage path is a `/`-separated list of addressable segments.
///
/// Rejects leading slashes, `.`/`..` segments, empty segments, backslashes and control
/// characters. Any other character (spaces, non-ASCII) is allowed, so objects written by
/// other tools stay reachable.
pub fn is_valid_storage_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('/').all(|seg| {
            !seg.is_empty()
                && seg != "."
                && seg != ".."
                && !seg.chars().any(|c| c == '\\' || c.is_control())
        })
}

/// Stricter check for paths this API writes: every segment must match
/// `STORAGE_SEGMENT_REGEX` on top of [`is_valid_storage_path`].
pub fn is_valid_upload_path(path: &str) -> bool {
    is_valid_storage_path(path)
        && path
            .split('/')
            .all(|seg| STORAGE_SEGMENT_REGEX.is_match(seg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        title: String,
        #[validate(custom(function = "not_blank"))]
        body: String,
        #[validate(custom(function = "entries_not_blank"))]
        tags: Vec<String>,
    }

    #[test]
    fn test_validate_fields_sorted() {
        let sample = Sample {
            title: "  ".to_string(),
            body: String::new(),
            tags: vec!["ok".to_string()],
        };
        let err = validate_fields(&sample).unwrap_err();
        assert_eq!(err.fields(), &["body".to_string(), "title".to_string()]);
    }

    #[test]
    fn test_validate_fields_ok() {
        let sample = Sample {
            title: "Hello".to_string(),
            body: "World".to_string(),
            tags: vec![],
        };
        assert!(validate_fields(&sample).is_ok());
    }

    #[test]
    fn test_blank_entries_rejected() {
        let sample = Sample {
            title: "Hello".to_string(),
            body: "World".to_string(),
            tags: vec!["a".to_string(), " ".to_string()],
        };
        let err = validate_fields(&sample).unwrap_err();
        assert_eq!(err.fields(), &["tags".to_string()]);
    }

    #[test]
    fn test_storage_path_valid() {
        assert!(is_valid_storage_path("2024/1/abc.jpg"));
        assert!(is_valid_storage_path("brands/hero-banner_v2.webp"));
        assert!(is_valid_storage_path("file.png"));
    }

    #[test]
    fn test_storage_path_invalid() {
        assert!(!is_valid_storage_path("")); // empty
        assert!(!is_valid_storage_path("/abs/path.jpg")); // leading slash
        assert!(!is_valid_storage_path("a//b.jpg")); // empty segment
        assert!(!is_valid_storage_path("../etc/passwd")); // traversal
        assert!(!is_valid_storage_path("a/./b.jpg")); // dot segment
        assert!(!is_valid_storage_path("dir/")); // trailing slash
        assert!(!is_valid_storage_path("a\\..\\b.jpg")); // backslash
        assert!(!is_valid_storage_path("a/b\n.jpg")); // control char
    }

    #[test]
    fn test_storage_path_allows_foreign_names() {
        assert!(is_valid_storage_path("2024/1/my photo.jpg"));
        assert!(is_valid_storage_path("café.jpg"));
        assert!(is_valid_storage_path("IMG (1).png"));
        assert!(is_valid_storage_path("..hidden/x..y.png"));
    }

    #[test]
    fn test_upload_path_is_strict() {
        assert!(is_valid_upload_path("uploads/hero-banner_v2.webp"));
        assert!(!is_valid_upload_path("uploads/my photo.jpg"));
        assert!(!is_valid_upload_path("café/a.png"));
        assert!(!is_valid_upload_path("../a.png"));
    }
}
