pub mod auth;
pub mod brands;
pub mod files;
pub mod jobs;
pub mod posts;
