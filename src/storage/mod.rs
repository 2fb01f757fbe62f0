//! # Dual-Backend Image Storage
//!
//! Final encoded images are persisted either to a per-category directory
//! under the local uploads root (development) or to a remote blob service
//! (production), behind the [`ObjectStorage`] trait. The backend is chosen
//! once at startup from configuration; every `save` returns a stable public
//! reference (root-relative `/uploads/...` path or absolute URL) that goes
//! straight into the content store.

mod blob;
mod local;

pub use blob::BlobStorage;
pub use local::LocalStorage;

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

/// Logical upload category; each maps to a directory or key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Submissions,
    Cocktails,
    Memorabilia,
    Homies,
    WhatsNew,
}

impl ImageCategory {
    pub fn dir_name(self) -> &'static str {
        match self {
            ImageCategory::Submissions => "submissions",
            ImageCategory::Cocktails => "cocktails",
            ImageCategory::Memorabilia => "memorabilia",
            ImageCategory::Homies => "homies",
            ImageCategory::WhatsNew => "whats-new",
        }
    }
}

/// Errors surfaced by either storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    #[error("blob request failed")]
    Http(#[from] reqwest::Error),

    #[error("blob service returned status {0}")]
    Remote(reqwest::StatusCode),
}

/// The seam between the ingestion pipeline and the two storage backends.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Persists canonical-format image bytes under `category` and returns
    /// the public reference for them. Every save produces a new object.
    async fn save(&self, category: ImageCategory, data: &[u8]) -> Result<String, StorageError>;

    /// Removes a previously stored object. Must be a no-op (not an error)
    /// for references that do not exist or were never produced by this
    /// backend, since entities may carry placeholder or pre-pipeline
    /// references.
    async fn delete(&self, reference: &str) -> Result<(), StorageError>;
}

/// Collision-resistant synthetic object name, independent of whatever the
/// client called the file. Always carries the canonical extension.
fn synthetic_filename() -> String {
    let timestamp = OffsetDateTime::now_utc().unix_timestamp();
    let suffix: u32 = rand::random();
    format!("{timestamp:x}-{suffix:08x}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_filenames_use_canonical_extension() {
        let name = synthetic_filename();
        assert!(name.ends_with(".jpg"));
        assert!(name.contains('-'));
    }

    #[test]
    fn synthetic_filenames_differ() {
        assert_ne!(synthetic_filename(), synthetic_filename());
    }
}
