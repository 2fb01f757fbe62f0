//! # Legacy Phone-Camera Format Handling
//!
//! HEIC/HEIF containers from mobile camera apps can't be decoded by the
//! ambient image crate, so they get a dedicated decode step before the
//! compressor. Detection never trusts the declared type alone: upstream
//! clients routinely mislabel these files, so the filename extension and
//! the `ftyp` byte signature are checked too.
//!
//! Decoding shells out to a system codec binary over scratch files. This is
//! the one place codec fragility lives; any failure here becomes a specific
//! user-facing 400, never an unhandled 500.

use std::env;
use std::sync::OnceLock;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// User-displayable message for a failed HEIC decode.
pub const HEIC_DECODE_USER_MESSAGE: &str =
    "Could not process HEIC photo. Try saving as JPEG from your Photos app first.";

/// HEIF container brands seen in the wild (stills and sequences).
const HEIC_BRANDS: [&[u8; 4]; 8] = [
    b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevm", b"mif1", b"msf1",
];

#[derive(Debug, Error)]
pub enum HeicError {
    #[error("codec I/O error")]
    Io(#[from] std::io::Error),

    #[error("codec exited with failure: {0}")]
    Codec(String),
}

/// True when the filename carries a HEIC/HEIF extension.
pub fn has_heic_extension(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    lower.ends_with(".heic") || lower.ends_with(".heif")
}

/// True when the bytes open with an ISO-BMFF `ftyp` box whose major brand
/// is one of the HEIF family.
pub fn has_heic_signature(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }
    let brand: &[u8] = &data[8..12];
    HEIC_BRANDS.iter().any(|b| &brand == b)
}

/// True when any of declared type, filename, or byte signature says HEIC.
pub fn is_heic(content_type: &str, filename: &str, data: &[u8]) -> bool {
    let declared = content_type.to_ascii_lowercase();
    declared == "image/heic"
        || declared == "image/heif"
        || has_heic_extension(filename)
        || has_heic_signature(data)
}

/// The codec binary, named by `HEIF_CONVERT_BIN` (default `heif-convert`).
/// Read from the environment exactly once.
fn codec_binary() -> &'static str {
    static BIN: OnceLock<String> = OnceLock::new();
    BIN.get_or_init(|| env::var("HEIF_CONVERT_BIN").unwrap_or_else(|_| "heif-convert".to_string()))
}

/// Decodes a HEIC container into JPEG bytes suitable for the compressor.
///
/// Runs the [`codec_binary`] against tempfiles. The caller maps errors to
/// [`HEIC_DECODE_USER_MESSAGE`].
pub async fn decode_to_jpeg(data: &[u8]) -> Result<Vec<u8>, HeicError> {
    let input = tempfile::Builder::new().suffix(".heic").tempfile()?;
    let output = tempfile::Builder::new().suffix(".jpg").tempfile()?;
    tokio::fs::write(input.path(), data).await?;

    let binary = codec_binary();
    debug!(binary, "Decoding HEIC upload");

    let result = Command::new(binary)
        .arg("-q")
        .arg("95")
        .arg(input.path())
        .arg(output.path())
        .output()
        .await?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        warn!(%stderr, "HEIC decode failed");
        return Err(HeicError::Codec(stderr.into_owned()));
    }

    let decoded = tokio::fs::read(output.path()).await?;
    if decoded.is_empty() {
        warn!("HEIC decode produced no output");
        return Err(HeicError::Codec("empty output".to_string()));
    }

    Ok(decoded)
}
