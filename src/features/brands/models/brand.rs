use sqlx::FromRow;

/// Brand profile. The name is the brand's identity.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Brand {
    pub name: String,
    pub description: String,
    /// Opaque image references: hosted URLs or inline base64 data
    pub images: Vec<String>,
    pub website: Option<String>,
}
