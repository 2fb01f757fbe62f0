//! # Compressor/Resizer
//!
//! Every accepted upload is normalized to a single canonical encoding
//! before storage: downsampled so neither axis exceeds the configured
//! bound (aspect preserved, never upscaled) and re-encoded as JPEG at a
//! fixed quality. Callers must not assume the stored bytes share the
//! upload's original format.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, imageops::FilterType};
use tracing::{debug, trace};

use crate::utils::constant::{JPEG_QUALITY, MAX_IMAGE_DIMENSION};

/// Provides image compression for the ingestion pipeline.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Produces the canonical stored bytes for an image.
    ///
    /// Deterministic for identical input bytes; the input is never
    /// mutated. Alpha channels are flattened to RGB since the canonical
    /// encoding has none.
    pub fn compress(data: &[u8]) -> Result<Vec<u8>, image::ImageError> {
        let img = image::load_from_memory(data)?;
        let (width, height) = img.dimensions();
        trace!(width, height, "Loaded upload for compression");

        let img = if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            let resized = img.resize(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION, FilterType::Lanczos3);
            debug!(
                from_width = width,
                from_height = height,
                to_width = resized.width(),
                to_height = resized.height(),
                "Downsampled oversized image"
            );
            resized
        } else {
            img
        };

        let img = DynamicImage::ImageRgb8(img.to_rgb8());

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
        img.write_with_encoder(encoder)?;

        trace!(output_size = buffer.len(), "Encoded canonical JPEG");
        Ok(buffer)
    }
}
