//! Durable storage for uploaded files

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::Result;
use crate::types::StoredFile;

/// Persists uploaded files under a configured directory.
///
/// Each upload gets a fresh UUID as its on-disk name, keeping the original
/// extension so path-based extractors see the right suffix. Extraction runs
/// against the stored copy, never the request body.
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    /// Create the store, ensuring the upload directory exists
    pub fn new(config: &StorageConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;
        Ok(Self {
            upload_dir: config.upload_dir.clone(),
        })
    }

    /// Persist one uploaded file and return its stored identity
    pub async fn save(
        &self,
        original_filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredFile> {
        let id = Uuid::new_v4();

        let stored_name = match extension(original_filename) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        };
        let path = self.upload_dir.join(stored_name);

        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(
            file_id = %id,
            filename = original_filename,
            size = bytes.len(),
            "Stored uploaded file"
        );

        Ok(StoredFile {
            id,
            path,
            original_filename: original_filename.to_string(),
            content_type: content_type.to_string(),
        })
    }
}

fn extension(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
}
