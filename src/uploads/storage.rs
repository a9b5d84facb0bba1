use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;

use super::{UploadCategory, CATEGORIES};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to prepare storage directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to store uploaded file at {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Metadata of one accepted upload. Immutable once created.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub original_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
    pub category: String,
}

/// Result of persisting one upload: its record plus the public URL clients
/// use to retrieve it.
#[derive(Clone, Debug)]
pub struct StoredUpload {
    pub record: UploadRecord,
    pub public_url: String,
}

/// Storage sink for accepted uploads. Callers hand over a fully validated
/// buffer; implementations own naming and persistence.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn put(
        &self,
        category: &UploadCategory,
        original_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<StoredUpload, StorageError>;
}

/// Local-disk store writing under `<uploads_root>/<category>/`.
pub struct DiskStore {
    uploads_root: PathBuf,
}

impl DiskStore {
    /// Create the store, materializing every category directory up front.
    /// `create_dir_all` is idempotent, so repeated or concurrent construction
    /// over the same root is safe.
    pub async fn new(uploads_root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let uploads_root = uploads_root.into();

        for category in CATEGORIES {
            let dir = uploads_root.join(category.slug);
            fs::create_dir_all(&dir).await.map_err(|source| StorageError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }

        Ok(Self { uploads_root })
    }
}

#[async_trait]
impl MediaStore for DiskStore {
    async fn put(
        &self,
        category: &UploadCategory,
        original_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<StoredUpload, StorageError> {
        let file_name = storage_file_name(original_name);
        let path = self.uploads_root.join(category.slug).join(&file_name);

        fs::write(&path, &data).await.map_err(|source| StorageError::Write {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(
            category = category.slug,
            file = %file_name,
            size = data.len(),
            "stored upload"
        );

        Ok(StoredUpload {
            public_url: public_url(category, &file_name),
            record: UploadRecord {
                original_name: original_name.to_string(),
                file_name,
                mime_type: mime_type.to_string(),
                size: data.len(),
                category: category.slug.to_string(),
            },
        })
    }
}

/// Collision-resistant storage name: millisecond epoch timestamp plus a
/// pseudorandom suffix in [0, 1e9), keeping the original extension.
/// Uniqueness is probabilistic, not absolute; no cross-request coordination.
pub fn storage_file_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    format!("{}-{}{}", millis, suffix, extension)
}

/// Public path for a stored file. Always forward slashes, independent of the
/// host platform's separator.
pub fn public_url(category: &UploadCategory, file_name: &str) -> String {
    format!("/uploads/{}/{}", category.slug, file_name).replace('\\', "/")
}
