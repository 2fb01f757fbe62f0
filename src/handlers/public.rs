//! # Public Read Handlers
//!
//! Unauthenticated GET endpoints returning ordered content lists for the
//! site front end.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppResult;
use crate::models::{AppState, Cocktail, Homie, Memorabilia, Submission, WhatsNewItem};
use crate::store;

/// GET /api/cocktails
#[instrument(skip_all)]
pub async fn list_cocktails(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Cocktail>>> {
    Ok(Json(store::cocktails::list(state.db.as_ref()).await?))
}

/// GET /api/homies
#[instrument(skip_all)]
pub async fn list_homies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Homie>>> {
    Ok(Json(store::homies::list(state.db.as_ref()).await?))
}

/// GET /api/memorabilia
#[instrument(skip_all)]
pub async fn list_memorabilia(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Memorabilia>>> {
    Ok(Json(store::memorabilia::list(state.db.as_ref()).await?))
}

/// GET /api/whats-new
#[instrument(skip_all)]
pub async fn list_whats_new(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<WhatsNewItem>>> {
    Ok(Json(store::whats_new::list(state.db.as_ref()).await?))
}

/// GET /api/submissions/approved
///
/// Only approved visitor photos are ever exposed publicly.
#[instrument(skip_all)]
pub async fn list_approved_submissions(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Submission>>> {
    Ok(Json(
        store::submissions::list_approved(state.db.as_ref()).await?,
    ))
}
