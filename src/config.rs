//! # Environment Configuration
//!
//! All environment-driven configuration is read once at startup into a
//! [`Config`] value and injected from there. The one exception is the
//! image codec binary override (`HEIF_CONVERT_BIN`), read once lazily by
//! [`crate::services::heic`]. Backend selection (local vs. remote database,
//! local vs. remote blob storage) is a pure function of which variables are
//! present.

use std::env;
use std::path::PathBuf;

/// Remote SQLite-compatible database (Turso) connection settings.
#[derive(Debug, Clone)]
pub struct TursoConfig {
    pub url: String,
    pub auth_token: String,
}

/// Remote blob store connection settings.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub base_url: String,
    pub token: String,
}

/// Application configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the local embedded database file. Ignored when `turso` is set.
    pub database_path: PathBuf,
    /// Remote database settings; presence selects the remote backend.
    pub turso: Option<TursoConfig>,
    /// Remote blob store settings; presence selects the remote backend.
    pub blob: Option<BlobConfig>,
    /// Root directory for locally stored uploads.
    pub uploads_root: PathBuf,
    /// Shared admin secret. `None` means open mode: admin routes are
    /// deliberately unrestricted (documented behavior for local setups).
    pub admin_password: Option<String>,
    /// TCP port to listen on.
    pub port: u16,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_PATH` - local SQLite file (default `data/guffs.db`)
    /// - `TURSO_DATABASE_URL` / `TURSO_AUTH_TOKEN` - both set selects the
    ///   remote database backend
    /// - `BLOB_READ_WRITE_TOKEN` - selects the remote blob storage backend
    /// - `BLOB_STORE_URL` - blob service base URL (default Vercel Blob)
    /// - `UPLOADS_PATH` - local uploads root (default `public/uploads`)
    /// - `ADMIN_PASSWORD` - shared admin secret; unset enables open mode
    /// - `PORT` - listen port (default 8090)
    pub fn from_env() -> Self {
        let turso = match (env::var("TURSO_DATABASE_URL"), env::var("TURSO_AUTH_TOKEN")) {
            (Ok(url), Ok(auth_token)) => Some(TursoConfig { url, auth_token }),
            _ => None,
        };

        let blob = env::var("BLOB_READ_WRITE_TOKEN").ok().map(|token| BlobConfig {
            base_url: env::var("BLOB_STORE_URL")
                .unwrap_or_else(|_| "https://blob.vercel-storage.com".to_string()),
            token,
        });

        Self {
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/guffs.db")),
            turso,
            blob,
            uploads_root: env::var("UPLOADS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/uploads")),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8090),
        }
    }
}
