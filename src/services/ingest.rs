//! # Upload Ingestion Pipeline
//!
//! The one path every incoming image takes: validate, normalize legacy
//! formats, compress to the canonical encoding, persist, and return the
//! public reference for the content store. No handler stores raw uploaded
//! bytes.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::services::heic::{self, HeicError};
use crate::services::image::ImageProcessor;
use crate::services::validate::{UploadValidator, ValidationError};
use crate::storage::{ImageCategory, ObjectStorage, StorageError};

/// Pipeline failure. Client input problems (validation, unreadable image,
/// failed legacy decode) map to 4xx responses; storage problems to 500.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("legacy format decode failed")]
    Heic(#[from] HeicError),

    #[error("image processing failed")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Runs the full pipeline for one upload and returns the stored reference.
#[instrument(skip(storage, data), fields(category = category.dir_name(), size = data.len()))]
pub async fn ingest_image(
    storage: &dyn ObjectStorage,
    category: ImageCategory,
    content_type: &str,
    filename: &str,
    data: &[u8],
) -> Result<String, IngestError> {
    UploadValidator::validate(content_type, filename, data)?;

    let normalized;
    let input: &[u8] = if heic::is_heic(content_type, filename, data) {
        debug!("Normalizing legacy phone-camera format");
        normalized = heic::decode_to_jpeg(data).await?;
        &normalized
    } else {
        data
    };

    let encoded = ImageProcessor::compress(input)?;
    let reference = storage.save(category, &encoded).await?;

    debug!(reference, "Upload ingested");
    Ok(reference)
}
