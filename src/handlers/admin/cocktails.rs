//! Admin cocktail management.

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
use crate::models::{AppState, Cocktail};
use crate::services::ingest::ingest_image;
use crate::storage::ImageCategory;
use crate::store::cocktails::{self, CocktailPatch, NewCocktail};
use crate::utils::constant::PLACEHOLDER_IMAGE;

/// GET /api/admin/cocktails
#[instrument(skip_all)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Cocktail>>> {
    Ok(Json(cocktails::list(state.db.as_ref()).await?))
}

/// POST /api/admin/cocktails MultipartForm
///
/// A cocktail without a photo gets the site placeholder image.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<Cocktail>> {
    let form = FormData::read(multipart).await?;

    let (Some(name), Some(description)) = (form.text_owned("name"), form.text_owned("description"))
    else {
        return Err(AppError::BadRequest("Name and description are required."));
    };

    let image_path = match &form.file {
        Some(file) => {
            ingest_image(
                state.storage.as_ref(),
                ImageCategory::Cocktails,
                &file.content_type,
                &file.filename,
                &file.data,
            )
            .await?
        }
        None => PLACEHOLDER_IMAGE.to_string(),
    };

    let cocktail = cocktails::create(
        state.db.as_ref(),
        NewCocktail {
            name,
            description,
            image_path,
            sort_order: 0,
            friend_name: form.text_owned("friendName"),
            ingredients: form.text_owned("ingredients"),
        },
    )
    .await?;

    info!(id = cocktail.id, "Cocktail created");
    Ok(Json(cocktail))
}

/// PATCH /api/admin/cocktails/{id} MultipartForm
///
/// Partial merge; a replacement photo releases the old stored image.
#[instrument(skip_all, fields(id, request_id = %uuid::Uuid::new_v4()))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<Cocktail>> {
    let existing = cocktails::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    let form = FormData::read(multipart).await?;

    let new_image = match &form.file {
        Some(file) => Some(
            ingest_image(
                state.storage.as_ref(),
                ImageCategory::Cocktails,
                &file.content_type,
                &file.filename,
                &file.data,
            )
            .await?,
        ),
        None => None,
    };

    let patch = CocktailPatch {
        name: form.text_owned("name"),
        description: form.text_owned("description"),
        image_path: new_image.clone(),
        sort_order: None,
        friend_name: form.nullable_patch("friendName"),
        ingredients: form.nullable_patch("ingredients"),
        image_rotation: None,
    };

    let updated = cocktails::update(state.db.as_ref(), id, patch)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    if new_image.is_some() {
        release_image(state.storage.as_ref(), &existing.image_path).await?;
    }

    Ok(Json(updated))
}

/// PATCH /api/admin/cocktails/{id}/rotate
#[instrument(skip_all, fields(id))]
pub async fn rotate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<RotateBody>,
) -> AppResult<Json<Cocktail>> {
    let rotation = body.validated()?;

    cocktails::update(
        state.db.as_ref(),
        id,
        CocktailPatch {
            image_rotation: Some(rotation),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::NotFound("Not found"))
    .map(Json)
}

/// PATCH /api/admin/cocktails/reorder
#[instrument(skip_all)]
pub async fn reorder(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReorderBody>,
) -> AppResult<Json<Value>> {
    cocktails::reorder(state.db.as_ref(), &body.ids).await?;
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/admin/cocktails/{id}
///
/// Also removes the backing stored image.
#[instrument(skip_all, fields(id))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let existing = cocktails::get(state.db.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;

    release_image(state.storage.as_ref(), &existing.image_path).await?;
    cocktails::delete(state.db.as_ref(), id).await?;

    info!(id, "Cocktail deleted");
    Ok(Json(json!({ "ok": true })))
}
