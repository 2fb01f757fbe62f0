//! # Visitor Photo Submission Handler
//!
//! The one public write: anyone can submit a photo for the wall. The file
//! runs the full ingestion pipeline (validation, legacy-format
//! normalization, compression, storage) and the row enters the moderation
//! queue as pending; nothing is shown publicly until an admin approves it.

use std::sync::Arc;

use axum::{Json, extract::{Multipart, State}};
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};
use crate::handlers::form_data::FormData;
use crate::models::{AppState, Submission};
use crate::services::ingest::ingest_image;
use crate::storage::ImageCategory;
use crate::store;

/// POST /api/upload MultipartForm (file + optional guestName, comment)
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn submit_photo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<Submission>> {
    let form = FormData::read(multipart).await?;

    let Some(file) = &form.file else {
        return Err(AppError::BadRequest("No file provided."));
    };

    let image_path = ingest_image(
        state.storage.as_ref(),
        ImageCategory::Submissions,
        &file.content_type,
        &file.filename,
        &file.data,
    )
    .await?;

    let submission = store::submissions::create(
        state.db.as_ref(),
        store::submissions::NewSubmission {
            image_path,
            guest_name: form.text_owned("guestName"),
            comment: form.text_owned("comment"),
        },
    )
    .await?;

    info!(id = submission.id, "Visitor submission received");
    Ok(Json(submission))
}
