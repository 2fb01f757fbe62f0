//! Admin management of the what's-new feed.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::{ReorderBody, RotateBody, release_image};
use crate::error::{AppError, AppResult};
use crate::handlers::form_data::FormData;
use crate::models::{AppState, WhatsNewItem};
use crate::services::ingest::ingest_image;
use crate::storage::ImageCategory;
use crate::store::whats_new::{self, NewWhatsNewItem, WhatsNewPatch};

/// GET /api/admin/whats-new
#[instrument(skip_all)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<WhatsNewItem>>> {
    Ok(Json(whats_new::list(state.db.as_ref()).await?))
}

/// POST /api/admin/whats-new MultipartForm
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<WhatsNewItem>> {
    let form = FormData::read(multipart).await?;

    let Some(description) = form.text_owned("description") else {
        return Err(AppError::BadRequest("Description is required."));
    };
    let Some(file) = &form.file else {
        return Err(AppError::BadRequest("No file provided."));
    };

    let image_path = ingest_image(
        state.storage.as_ref(),
        ImageCategory::WhatsNew,
        &file.content_type,
        &file.filename,
        &file.data,
    )
    .await?;

    let item = whats_new::create(
        state.db.as_ref(),
        NewWhatsNewItem {
            description,
            image_path,
            sort_order: 0,
        },
    )
    .await?;

    info!(id = item.id, "What's-new item created");
    Ok(Json(item))
}

/// PATCH /api/admin/whats-new/{id} MultipartForm
#[instrument(skip_all, fields(id, request_id = %uuid::Uuid::new_v4()))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<WhatsNewItem>> {
    let existing = whats_new::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    let form = FormData::read(multipart).await?;

    let new_image = match &form.file {
        Some(file) => Some(
            ingest_image(
                state.storage.as_ref(),
                ImageCategory::WhatsNew,
                &file.content_type,
                &file.filename,
                &file.data,
            )
            .await?,
        ),
        None => None,
    };

    let patch = WhatsNewPatch {
        description: form.text_owned("description"),
        image_path: new_image.clone(),
        sort_order: None,
        image_rotation: None,
    };

    let updated = whats_new::update(state.db.as_ref(), id, patch)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    if new_image.is_some() {
        release_image(state.storage.as_ref(), &existing.image_path).await?;
    }

    Ok(Json(updated))
}

/// PATCH /api/admin/whats-new/{id}/rotate
#[instrument(skip_all, fields(id))]
pub async fn rotate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<RotateBody>,
) -> AppResult<Json<WhatsNewItem>> {
    let rotation = body.validated()?;

    whats_new::update(
        state.db.as_ref(),
        id,
        WhatsNewPatch {
            image_rotation: Some(rotation),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::NotFound("Not found"))
    .map(Json)
}

/// PATCH /api/admin/whats-new/reorder
#[instrument(skip_all)]
pub async fn reorder(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReorderBody>,
) -> AppResult<Json<Value>> {
    whats_new::reorder(state.db.as_ref(), &body.ids).await?;
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/admin/whats-new/{id}
#[instrument(skip_all, fields(id))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let existing = whats_new::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    release_image(state.storage.as_ref(), &existing.image_path).await?;
    whats_new::delete(state.db.as_ref(), id).await?;

    info!(id, "What's-new item deleted");
    Ok(Json(json!({ "ok": true })))
}
