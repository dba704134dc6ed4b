mod media_janitor;
mod post_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use media_janitor::{CleanupReport, MediaJanitor};
pub use post_service::{derive_excerpt, PostService};
