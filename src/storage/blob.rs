//! Remote blob store backend.
//!
//! Objects are PUT under a per-category key prefix with public read access
//! and the canonical content type; the service answers with the absolute
//! URL that becomes the stored reference. Deletes go through the service's
//! bulk-delete endpoint and treat unknown URLs as already gone.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{ImageCategory, ObjectStorage, StorageError, synthetic_filename};

pub struct BlobStorage {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl BlobStorage {
    pub fn new(base_url: &str, token: &str) -> Self {
        info!(url = %base_url, "Using remote blob storage backend");
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct PutResponse {
    url: String,
}

#[async_trait]
impl ObjectStorage for BlobStorage {
    async fn save(&self, category: ImageCategory, data: &[u8]) -> Result<String, StorageError> {
        let pathname = format!("{}/{}", category.dir_name(), synthetic_filename());
        debug!(pathname, size = data.len(), "Uploading image to blob store");

        let response = self
            .http
            .put(format!("{}/{pathname}", self.base_url))
            .bearer_auth(&self.token)
            .header("x-content-type", "image/jpeg")
            .header("x-access", "public")
            .body(data.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Remote(response.status()));
        }

        let body: PutResponse = response.json().await?;
        Ok(body.url)
    }

    async fn delete(&self, reference: &str) -> Result<(), StorageError> {
        // Only absolute URLs belong to this backend.
        if !reference.starts_with("http://") && !reference.starts_with("https://") {
            return Ok(());
        }

        let response = self
            .http
            .post(format!("{}/delete", self.base_url))
            .bearer_auth(&self.token)
            .json(&json!({ "urls": [reference] }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(StorageError::Remote(status))
        }
    }
}
