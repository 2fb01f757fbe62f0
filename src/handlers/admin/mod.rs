//! # Admin API
//!
//! Password-gated content management: full CRUD plus reorder and rotate
//! for every content type, and moderation of visitor submissions. The
//! session check runs as middleware before any handler body, so
//! unauthenticated requests are rejected before any parsing or mutation.

pub mod cocktails;
pub mod homies;
pub mod memorabilia;
pub mod submissions;
pub mod whats_new;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch},
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::admin_auth_middleware;
use crate::models::AppState;
use crate::storage::ObjectStorage;
use crate::utils::constant::VALID_ROTATIONS;

/// Body of every reorder endpoint: the full id list in desired order.
#[derive(Deserialize)]
pub struct ReorderBody {
    pub ids: Vec<i64>,
}

/// Body of every rotate endpoint.
#[derive(Deserialize)]
pub struct RotateBody {
    #[serde(rename = "imageRotation")]
    pub image_rotation: i64,
}

impl RotateBody {
    /// Rejects anything but the four right-angle values.
    pub fn validated(&self) -> AppResult<i64> {
        if VALID_ROTATIONS.contains(&self.image_rotation) {
            Ok(self.image_rotation)
        } else {
            Err(AppError::BadRequest(
                "imageRotation must be 0, 90, 180, or 270",
            ))
        }
    }
}

/// Releases a replaced or deleted row's stored image. Placeholder and
/// foreign references are no-ops inside the backend.
pub(crate) async fn release_image(storage: &dyn ObjectStorage, reference: &str) -> AppResult<()> {
    storage.delete(reference).await?;
    Ok(())
}

/// Builds the session-gated admin router.
pub fn admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/admin/cocktails",
            get(cocktails::list).post(cocktails::create),
        )
        .route("/api/admin/cocktails/reorder", patch(cocktails::reorder))
        .route(
            "/api/admin/cocktails/{id}",
            patch(cocktails::update).delete(cocktails::delete),
        )
        .route("/api/admin/cocktails/{id}/rotate", patch(cocktails::rotate))
        .route("/api/admin/homies", get(homies::list).post(homies::create))
        .route("/api/admin/homies/reorder", patch(homies::reorder))
        .route(
            "/api/admin/homies/{id}",
            patch(homies::update).delete(homies::delete),
        )
        .route("/api/admin/homies/{id}/rotate", patch(homies::rotate))
        .route(
            "/api/admin/memorabilia",
            get(memorabilia::list).post(memorabilia::create),
        )
        .route(
            "/api/admin/memorabilia/reorder",
            patch(memorabilia::reorder),
        )
        .route(
            "/api/admin/memorabilia/{id}",
            patch(memorabilia::update).delete(memorabilia::delete),
        )
        .route(
            "/api/admin/memorabilia/{id}/rotate",
            patch(memorabilia::rotate),
        )
        .route(
            "/api/admin/whats-new",
            get(whats_new::list).post(whats_new::create),
        )
        .route("/api/admin/whats-new/reorder", patch(whats_new::reorder))
        .route(
            "/api/admin/whats-new/{id}",
            patch(whats_new::update).delete(whats_new::delete),
        )
        .route("/api/admin/whats-new/{id}/rotate", patch(whats_new::rotate))
        .route("/api/admin/submissions", get(submissions::list))
        .route(
            "/api/admin/submissions/{id}",
            patch(submissions::set_status).delete(submissions::delete),
        )
        .route(
            "/api/admin/submissions/{id}/rotate",
            patch(submissions::rotate),
        )
        .route_layer(from_fn_with_state(state, admin_auth_middleware))
}
