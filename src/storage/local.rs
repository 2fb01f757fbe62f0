//! Local filesystem storage under a configured uploads root.
//!
//! References are root-relative `/uploads/{category}/{name}` paths that the
//! web tier serves directly via `ServeDir`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{ImageCategory, ObjectStorage, StorageError, synthetic_filename};

const PUBLIC_PREFIX: &str = "/uploads/";

pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn save(&self, category: ImageCategory, data: &[u8]) -> Result<String, StorageError> {
        let dir = self.root.join(category.dir_name());
        fs::create_dir_all(&dir).await?;

        let filename = synthetic_filename();
        let path = dir.join(&filename);

        debug!(path = %path.display(), size = data.len(), "Saving image");
        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        Ok(format!("{PUBLIC_PREFIX}{}/{filename}", category.dir_name()))
    }

    async fn delete(&self, reference: &str) -> Result<(), StorageError> {
        // Foreign references (placeholder assets, remote URLs, anything not
        // under the uploads root) are left alone.
        let Some(relative) = reference.strip_prefix(PUBLIC_PREFIX) else {
            return Ok(());
        };
        if relative.split('/').any(|segment| segment == "..") {
            return Ok(());
        }

        match fs::remove_file(self.root.join(relative)).await {
            Ok(()) => {
                debug!(reference, "Deleted stored image");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[tokio::test]
    async fn save_writes_under_category_and_returns_public_path() {
        let (dir, storage) = storage();

        let reference = storage
            .save(ImageCategory::Cocktails, b"not-really-a-jpeg")
            .await
            .unwrap();

        assert!(reference.starts_with("/uploads/cocktails/"));
        assert!(reference.ends_with(".jpg"));

        let on_disk = dir.path().join(reference.trim_start_matches("/uploads/"));
        assert_eq!(std::fs::read(on_disk).unwrap(), b"not-really-a-jpeg");
    }

    #[tokio::test]
    async fn delete_removes_file_and_is_idempotent() {
        let (dir, storage) = storage();

        let reference = storage
            .save(ImageCategory::Submissions, b"bytes")
            .await
            .unwrap();
        let on_disk = dir.path().join(reference.trim_start_matches("/uploads/"));
        assert!(on_disk.exists());

        storage.delete(&reference).await.unwrap();
        assert!(!on_disk.exists());

        // Second delete of the same reference is a no-op, not an error.
        storage.delete(&reference).await.unwrap();
    }

    #[tokio::test]
    async fn delete_ignores_foreign_references() {
        let (_dir, storage) = storage();

        storage.delete("/guffs-logo.svg").await.unwrap();
        storage
            .delete("https://blob.example.com/cocktails/a.jpg")
            .await
            .unwrap();
        storage.delete("/uploads/../../etc/passwd").await.unwrap();
    }
}
