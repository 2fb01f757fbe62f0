//! Admin homie management. Homies are the one content type whose photo is
//! optional.

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
use crate::models::{AppState, Homie};
use crate::services::ingest::ingest_image;
use crate::storage::ImageCategory;
use crate::store::homies::{self, HomiePatch, NewHomie};

/// GET /api/admin/homies
#[instrument(skip_all)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Homie>>> {
    Ok(Json(homies::list(state.db.as_ref()).await?))
}

/// POST /api/admin/homies MultipartForm
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<Homie>> {
    let form = FormData::read(multipart).await?;

    let (Some(name), Some(title), Some(description)) = (
        form.text_owned("name"),
        form.text_owned("title"),
        form.text_owned("description"),
    ) else {
        return Err(AppError::BadRequest(
            "Name, title, and description are required.",
        ));
    };

    let image_path = match &form.file {
        Some(file) => Some(
            ingest_image(
                state.storage.as_ref(),
                ImageCategory::Homies,
                &file.content_type,
                &file.filename,
                &file.data,
            )
            .await?,
        ),
        None => None,
    };

    let homie = homies::create(
        state.db.as_ref(),
        NewHomie {
            name,
            title,
            description,
            image_path,
            sort_order: 0,
        },
    )
    .await?;

    info!(id = homie.id, "Homie created");
    Ok(Json(homie))
}

/// PATCH /api/admin/homies/{id} MultipartForm
#[instrument(skip_all, fields(id, request_id = %uuid::Uuid::new_v4()))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<Homie>> {
    let existing = homies::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    let form = FormData::read(multipart).await?;

    let new_image = match &form.file {
        Some(file) => Some(
            ingest_image(
                state.storage.as_ref(),
                ImageCategory::Homies,
                &file.content_type,
                &file.filename,
                &file.data,
            )
            .await?,
        ),
        None => None,
    };

    let patch = HomiePatch {
        name: form.text_owned("name"),
        title: form.text_owned("title"),
        description: form.text_owned("description"),
        image_path: new_image.clone().map(Some),
        sort_order: None,
        image_rotation: None,
    };

    let updated = homies::update(state.db.as_ref(), id, patch)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    if new_image.is_some()
        && let Some(old) = &existing.image_path
    {
        release_image(state.storage.as_ref(), old).await?;
    }

    Ok(Json(updated))
}

/// PATCH /api/admin/homies/{id}/rotate
#[instrument(skip_all, fields(id))]
pub async fn rotate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<RotateBody>,
) -> AppResult<Json<Homie>> {
    let rotation = body.validated()?;

    homies::update(
        state.db.as_ref(),
        id,
        HomiePatch {
            image_rotation: Some(rotation),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::NotFound("Not found"))
    .map(Json)
}

/// PATCH /api/admin/homies/reorder
#[instrument(skip_all)]
pub async fn reorder(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReorderBody>,
) -> AppResult<Json<Value>> {
    homies::reorder(state.db.as_ref(), &body.ids).await?;
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/admin/homies/{id}
#[instrument(skip_all, fields(id))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let existing = homies::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    if let Some(image) = &existing.image_path {
        release_image(state.storage.as_ref(), image).await?;
    }
    homies::delete(state.db.as_ref(), id).await?;

    info!(id, "Homie deleted");
    Ok(Json(json!({ "ok": true })))
}
