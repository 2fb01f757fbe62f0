//! # Guffs - Bar Website Backend
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for the public site and admin API
//! - [`middleware`] - Admin session middleware
//! - [`services`] - Image ingestion pipeline (validation, HEIC, compression)
//! - [`store`] - Content queries over the [`db`] backend abstraction
//! - [`storage`] - Image storage backends (local filesystem, remote blob)
//! - [`utils`] - Utility constants

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::db::{Database, LocalDb, TursoDb, migrations};
use crate::handlers::{
    admin::admin_router, health_check, list_approved_submissions, list_cocktails, list_homies,
    list_memorabilia, list_whats_new, login, logout, submit_photo,
};
use crate::models::AppState;
use crate::storage::{BlobStorage, LocalStorage, ObjectStorage};
use crate::utils::constant::MAX_REQUEST_BODY_BYTES;

/// Creates the Axum router from environment-driven configuration.
///
/// Selects the database backend (local SQLite file when no Turso settings
/// are present, remote Turso otherwise), runs pending migrations, and picks
/// the image storage backend the same way. Both choices are made exactly
/// once here; nothing downstream re-reads the environment.
pub async fn app(config: Config) -> Router {
    let db: Arc<dyn Database> = match &config.turso {
        Some(turso) => {
            info!(url = %turso.url, "Using remote database backend");
            Arc::new(TursoDb::new(&turso.url, &turso.auth_token))
        }
        None => {
            info!(path = %config.database_path.display(), "Using local database backend");
            Arc::new(
                LocalDb::connect(&config.database_path)
                    .await
                    .expect("Failed to open local database"),
            )
        }
    };

    migrations::run(db.as_ref())
        .await
        .expect("Failed to run database migrations");

    let storage: Arc<dyn ObjectStorage> = match &config.blob {
        Some(blob) => {
            info!(url = %blob.base_url, "Using remote blob storage backend");
            Arc::new(BlobStorage::new(&blob.base_url, &blob.token))
        }
        None => {
            info!(root = %config.uploads_root.display(), "Using local storage backend");
            Arc::new(LocalStorage::new(config.uploads_root.clone()))
        }
    };

    app_with_backends(db, storage, config.admin_password, config.uploads_root)
}

/// Creates the Axum router over already-constructed backends.
///
/// Tests use this directly to inject an in-memory database and a
/// temporary-directory storage backend.
pub fn app_with_backends(
    db: Arc<dyn Database>,
    storage: Arc<dyn ObjectStorage>,
    admin_password: Option<String>,
    uploads_root: PathBuf,
) -> Router {
    let state = Arc::new(AppState::new(db, storage, admin_password));

    let public_routes = Router::new()
        .route("/health-check", get(health_check))
        .route("/api/cocktails", get(list_cocktails))
        .route("/api/homies", get(list_homies))
        .route("/api/memorabilia", get(list_memorabilia))
        .route("/api/whats-new", get(list_whats_new))
        .route("/api/submissions/approved", get(list_approved_submissions))
        .route("/api/upload", post(submit_photo))
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout));

    Router::new()
        .merge(public_routes)
        .merge(admin_router(Arc::clone(&state)))
        .nest_service("/uploads", ServeDir::new(uploads_root))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}
