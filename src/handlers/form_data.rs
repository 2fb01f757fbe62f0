//! # Multipart Form Reading
//!
//! Nine routes accept multipart submissions with the same shape: some text
//! fields plus at most one image file. This module reads a whole multipart
//! body into a [`FormData`] so handlers can work with plain accessors, and
//! keeps the omitted-vs-empty distinction the partial-update semantics
//! need: a field the client never sent is absent, a field sent blank is
//! present and empty.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::{error, warn};

use crate::error::AppError;

/// An uploaded file with the client's declared metadata.
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// All fields of one multipart submission.
pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl FormData {
    /// Drains the multipart stream. The file field must be named `file`;
    /// empty file parts (a form submitted with no selection) count as no
    /// file at all.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = HashMap::new();
        let mut file = None;

        loop {
            let field = multipart.next_field().await.map_err(|e| {
                error!(error = %e, "Error reading multipart form");
                AppError::BadRequest("Invalid multipart data")
            })?;
            let Some(field) = field else { break };

            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| {
                    warn!(error = %e, "Error reading file data");
                    AppError::BadRequest("Error reading file")
                })?;
                if !data.is_empty() {
                    file = Some(UploadedFile {
                        filename,
                        content_type,
                        data,
                    });
                }
            } else if !name.is_empty() {
                let value = field.text().await.map_err(|e| {
                    warn!(error = %e, field = %name, "Error reading form field");
                    AppError::BadRequest("Invalid multipart data")
                })?;
                fields.insert(name, value.trim().to_string());
            }
        }

        Ok(Self { fields, file })
    }

    /// The field's trimmed value, only when present and non-empty.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Whether the client sent the field at all (possibly blank).
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Owned variant of [`Self::text`] for handing values to the store.
    pub fn text_owned(&self, name: &str) -> Option<String> {
        self.text(name).map(str::to_string)
    }

    /// Patch value for a nullable text column: `None` when the field was
    /// omitted (keep stored value), `Some(None)` when sent blank (clear),
    /// `Some(Some(_))` when sent with content.
    pub fn nullable_patch(&self, name: &str) -> Option<Option<String>> {
        if self.has(name) {
            Some(self.text_owned(name))
        } else {
            None
        }
    }
}
