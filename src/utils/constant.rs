//! # Application Constants
//!
//! This module defines configuration constants used throughout the Guffs
//! backend: upload limits, image processing settings, and session handling.

/// Maximum accepted upload size for a single image file.
///
/// Files larger than this are rejected by the upload validator with a
/// user-displayable "too large" message.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Request body ceiling for multipart uploads.
///
/// Kept comfortably above [`MAX_UPLOAD_BYTES`] so oversized files reach the
/// validator and get its specific 400 instead of a framework-level 413.
pub const MAX_REQUEST_BODY_BYTES: usize = 24 * 1024 * 1024;

/// Maximum bounding dimension for stored images.
///
/// Uploads larger than this on either axis are downsampled preserving
/// aspect ratio; smaller images are never upscaled.
pub const MAX_IMAGE_DIMENSION: u32 = 2000;

/// JPEG quality for the canonical stored encoding.
pub const JPEG_QUALITY: u8 = 85;

/// Cookie name carrying the admin session secret.
pub const ADMIN_COOKIE: &str = "guffs_admin";

/// Lifetime of the admin session cookie.
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60; // 7 days

/// Image reference used for cocktails created without a photo.
pub const PLACEHOLDER_IMAGE: &str = "/guffs-logo.svg";

/// The only display rotations any write path accepts.
pub const VALID_ROTATIONS: [i64; 4] = [0, 90, 180, 270];
