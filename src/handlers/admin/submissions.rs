//! Moderation of visitor photo submissions.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::{RotateBody, release_image};
use crate::error::{AppError, AppResult};
use crate::models::{AppState, Submission, SubmissionStatus};
use crate::store::submissions;

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// GET /api/admin/submissions
///
/// The whole queue, newest first, regardless of status.
#[instrument(skip_all)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Submission>>> {
    Ok(Json(submissions::list(state.db.as_ref()).await?))
}

/// PATCH /api/admin/submissions/{id}
///
/// Moderation verdict; any status can move to any other status.
#[instrument(skip_all, fields(id))]
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<Submission>> {
    let Some(status) = SubmissionStatus::parse(&body.status) else {
        return Err(AppError::BadRequest(
            "status must be approved, denied, or pending",
        ));
    };

    let updated = submissions::set_status(state.db.as_ref(), id, status)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    info!(id, status = %body.status, "Submission moderated");
    Ok(Json(updated))
}

/// PATCH /api/admin/submissions/{id}/rotate
#[instrument(skip_all, fields(id))]
pub async fn rotate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<RotateBody>,
) -> AppResult<Json<Submission>> {
    let rotation = body.validated()?;

    submissions::set_rotation(state.db.as_ref(), id, rotation)
        .await?
        .ok_or(AppError::NotFound("Not found"))
        .map(Json)
}

/// DELETE /api/admin/submissions/{id}
///
/// Also removes the stored photo.
#[instrument(skip_all, fields(id))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let existing = submissions::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    release_image(state.storage.as_ref(), &existing.image_path).await?;
    submissions::delete(state.db.as_ref(), id).await?;

    info!(id, "Submission deleted");
    Ok(Json(json!({ "ok": true })))
}
