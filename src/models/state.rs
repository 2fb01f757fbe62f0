use std::sync::Arc;

use tracing::{info, warn};

use crate::db::Database;
use crate::storage::ObjectStorage;

/// Application state shared across requests. Both backends are constructed
/// exactly once at startup (after migrations have run) and injected here;
/// no handler ever re-selects or re-initializes a backend mid-session.
pub struct AppState {
    /// The content store backend (local SQLite or remote Turso).
    pub db: Arc<dyn Database>,
    /// The image storage backend (local filesystem or remote blob store).
    pub storage: Arc<dyn ObjectStorage>,
    /// Shared admin secret; `None` enables open mode.
    pub admin_password: Option<String>,
}

impl AppState {
    pub fn new(
        db: Arc<dyn Database>,
        storage: Arc<dyn ObjectStorage>,
        admin_password: Option<String>,
    ) -> Self {
        info!("Initializing application state");
        if admin_password.is_none() {
            warn!("ADMIN_PASSWORD not set; admin routes are open (open mode)");
        }

        Self {
            db,
            storage,
            admin_password,
        }
    }
}
