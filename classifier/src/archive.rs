//! Content-addressed archive of submitted drawings
//!
//! Images land in `<base>/<category>/<sha256>.png`. Identical submissions map
//! to the same file, so resubmitting a drawing does not grow the archive.

use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tokio::task::JoinHandle;

use shared::{session_debug, session_warn, SessionId};

use crate::error::ArchiveError;

/// Bucket used when no expected category was supplied
pub const UNKNOWN_BUCKET: &str = "unknown";

#[derive(Debug, Clone)]
pub struct ImageArchive {
    base_dir: PathBuf,
}

impl ImageArchive {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Hex SHA-256 of the image bytes
    pub fn content_hash(bytes: &[u8]) -> String {
        format!("{:x}", Sha256::digest(bytes))
    }

    /// Final location of an image without touching the disk
    pub fn path_for(&self, bytes: &[u8], category: Option<&str>) -> PathBuf {
        self.base_dir
            .join(bucket_name(category))
            .join(format!("{}.png", Self::content_hash(bytes)))
    }

    /// Persist an image, skipping the write when it is already archived
    pub async fn store(&self, bytes: &[u8], category: Option<&str>) -> Result<PathBuf, ArchiveError> {
        let path = self.path_for(bytes, category);
        let dir = path.parent().unwrap_or(&self.base_dir).to_path_buf();

        fs::create_dir_all(&dir)
            .await
            .map_err(|source| ArchiveError::CreateDir { path: dir, source })?;

        if fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(path);
        }

        fs::write(&path, bytes)
            .await
            .map_err(|source| ArchiveError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Archive in the background; failures are logged and otherwise dropped
    pub fn spawn_store(
        &self,
        bytes: Vec<u8>,
        category: Option<String>,
        session: Option<SessionId>,
    ) -> JoinHandle<()> {
        let archive = self.clone();
        let session = session.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        tokio::spawn(async move {
            match archive.store(&bytes, category.as_deref()).await {
                Ok(path) => {
                    session_debug!(session, "🗄️ Archived submission at {}", path.display());
                }
                Err(e) => {
                    session_warn!(session, "⚠️ Error saving original image: {}", e);
                }
            }
        })
    }
}

/// Directory-safe bucket name for an untrusted category label
fn bucket_name(category: Option<&str>) -> String {
    let sanitized: String = category
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();

    if sanitized.chars().all(|c| c == '_') {
        UNKNOWN_BUCKET.to_string()
    } else {
        sanitized
    }
}
