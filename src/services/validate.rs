//! # Upload Validation
//!
//! Pure accept/reject decision for incoming files, made before anything is
//! decoded or persisted. The two rejection reasons (type, size) are part of
//! the public contract and must stay distinguishable; both messages surface
//! verbatim in the client's form.

use thiserror::Error;

use crate::services::heic;
use crate::utils::constant::MAX_UPLOAD_BYTES;

/// Raster formats accepted by declared media type.
const ALLOWED_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];

/// Declared types that carry no real format information; for these the
/// filename extension and the byte signature decide.
const GENERIC_TYPES: [&str; 2] = ["", "application/octet-stream"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type. Use JPEG, PNG, WebP, GIF, or HEIC.")]
    UnsupportedType,

    #[error("File too large. Maximum size is 10MB.")]
    TooLarge,
}

impl ValidationError {
    /// The user-displayable message as a static string for the error body.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedType => {
                "Invalid file type. Use JPEG, PNG, WebP, GIF, or HEIC."
            }
            ValidationError::TooLarge => "File too large. Maximum size is 10MB.",
        }
    }
}

/// Provides upload validation for all ingestion handlers.
pub struct UploadValidator;

impl UploadValidator {
    /// Decides acceptance for a candidate file.
    ///
    /// The size ceiling is checked first so an oversized file always gets
    /// the "too large" reason, independent of its type. HEIC files are
    /// frequently mislabeled by phone browsers, so a generic declared type
    /// is accepted when the filename extension or the byte signature says
    /// HEIC.
    pub fn validate(
        content_type: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ValidationError> {
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge);
        }

        let declared = content_type.to_ascii_lowercase();
        if ALLOWED_TYPES.contains(&declared.as_str()) {
            return Ok(());
        }
        if GENERIC_TYPES.contains(&declared.as_str())
            && (heic::has_heic_extension(filename) || heic::has_heic_signature(data))
        {
            return Ok(());
        }
        // Mislabeled HEIC: the bytes have the last word.
        if heic::has_heic_signature(data) {
            return Ok(());
        }

        Err(ValidationError::UnsupportedType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_raster_types() {
        for ty in ["image/jpeg", "image/png", "image/webp", "image/gif"] {
            assert_eq!(UploadValidator::validate(ty, "photo.bin", b"xx"), Ok(()));
        }
    }

    #[test]
    fn accepts_declared_heic_types() {
        assert_eq!(
            UploadValidator::validate("image/heic", "IMG_0001.HEIC", b"xx"),
            Ok(())
        );
        assert_eq!(
            UploadValidator::validate("image/heif", "IMG_0001.heif", b"xx"),
            Ok(())
        );
    }

    #[test]
    fn accepts_generic_type_with_heic_extension() {
        assert_eq!(
            UploadValidator::validate("", "IMG_0001.heic", b"xx"),
            Ok(())
        );
        assert_eq!(
            UploadValidator::validate("application/octet-stream", "a.HEIF", b"xx"),
            Ok(())
        );
    }

    #[test]
    fn accepts_mislabeled_heic_by_signature() {
        let mut data = vec![0, 0, 0, 24];
        data.extend_from_slice(b"ftypheic");
        data.extend_from_slice(&[0; 16]);
        assert_eq!(
            UploadValidator::validate("text/plain", "upload", &data),
            Ok(())
        );
    }

    #[test]
    fn rejects_disallowed_types() {
        assert_eq!(
            UploadValidator::validate("application/pdf", "doc.pdf", b"%PDF"),
            Err(ValidationError::UnsupportedType)
        );
        assert_eq!(
            UploadValidator::validate("", "notes.txt", b"hello"),
            Err(ValidationError::UnsupportedType)
        );
    }

    #[test]
    fn rejects_oversized_files_regardless_of_type() {
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert_eq!(
            UploadValidator::validate("image/jpeg", "big.jpg", &big),
            Err(ValidationError::TooLarge)
        );
        // Size wins even when the type is also bad.
        assert_eq!(
            UploadValidator::validate("application/pdf", "big.pdf", &big),
            Err(ValidationError::TooLarge)
        );
    }

    #[test]
    fn accepts_files_at_the_ceiling() {
        let exact = vec![0u8; MAX_UPLOAD_BYTES];
        assert_eq!(
            UploadValidator::validate("image/jpeg", "big.jpg", &exact),
            Ok(())
        );
    }
}
