//! File-backed sync document store
//!
//! Each identity owns `<data_dir>/<identity>/sync_data.json`. Reads of a
//! document that was never written yield the empty default; writes replace
//! the whole file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::SyncError;
use super::types::SyncData;
use crate::Result;
use crate::constants::SYNC_FILE_NAME;
use crate::identity::IdentityKey;

#[derive(Clone, Debug)]
pub struct SyncStore {
    data_dir: PathBuf,
}

impl SyncStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The identity's isolated storage directory.
    pub fn user_dir(&self, key: &IdentityKey) -> PathBuf {
        self.data_dir.join(key.as_str())
    }

    pub fn document_path(&self, key: &IdentityKey) -> PathBuf {
        self.user_dir(key).join(SYNC_FILE_NAME)
    }

    /// Create the identity's storage directory if missing.
    pub async fn ensure_user_dir(&self, key: &IdentityKey) -> Result<()> {
        tokio::fs::create_dir_all(self.user_dir(key)).await?;
        Ok(())
    }

    /// Read the identity's document, or the empty default if none was pushed.
    pub async fn get(&self, key: &IdentityKey) -> Result<SyncData> {
        let path = self.document_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(identity = %key, "no sync document yet");
                return Ok(SyncData::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            SyncError::CorruptDocument {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate and fully overwrite the identity's document.
    pub async fn put(&self, key: &IdentityKey, data: &SyncData) -> Result<()> {
        data.validate()?;
        self.ensure_user_dir(key).await?;

        let bytes = serde_json::to_vec_pretty(data)?;
        tokio::fs::write(self.document_path(key), bytes).await?;
        tracing::debug!(
            identity = %key,
            files = data.files.len(),
            packages = data.packages.len(),
            "stored sync document"
        );
        Ok(())
    }
}
