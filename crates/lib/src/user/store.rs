//! File-backed credential store
//!
//! One JSON record per identity under the users directory. Storage is the
//! source of truth: nothing here caches records between calls.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::errors::UserError;
use super::types::UserRecord;
use crate::Result;
use crate::constants::RECORD_EXTENSION;
use crate::identity::IdentityKey;

#[derive(Clone, Debug)]
pub struct CredentialStore {
    users_dir: PathBuf,
}

impl CredentialStore {
    pub fn new(users_dir: impl Into<PathBuf>) -> Self {
        Self {
            users_dir: users_dir.into(),
        }
    }

    pub fn users_dir(&self) -> &Path {
        &self.users_dir
    }

    /// Path of the record for an identity.
    pub fn record_path(&self, key: &IdentityKey) -> PathBuf {
        self.users_dir
            .join(format!("{}.{RECORD_EXTENSION}", key.as_str()))
    }

    /// Load the record for an identity.
    ///
    /// Returns `UserError::UserNotFound` when no record exists. Any other
    /// failure is an I/O or corruption error.
    pub async fn load(&self, key: &IdentityKey) -> Result<UserRecord> {
        let path = self.record_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(UserError::UserNotFound {
                    identity: key.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };
        parse_record(&path, &bytes)
    }

    /// Whether a record exists for an identity.
    pub async fn exists(&self, key: &IdentityKey) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.record_path(key)).await?)
    }

    /// Persist a record, overwriting any previous version in place.
    pub async fn save(&self, record: &UserRecord) -> Result<()> {
        let path = self.record_path(&record.identity());
        let bytes = serde_json::to_vec_pretty(record)?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        tracing::debug!(path = %path.display(), "saved credential record");
        Ok(())
    }

    /// Read every record in the users directory.
    ///
    /// Entries that are not `<identity>.json` files are ignored, as are files
    /// that vanish mid-scan. Records that fail to parse are logged and
    /// skipped. Any other I/O failure aborts the scan, so an unreadable record
    /// is never mistaken for an absent one.
    pub async fn scan(&self) -> Result<Vec<UserRecord>> {
        let mut records = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.users_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }

            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            match parse_record(&path, &bytes) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "skipping credential record: {e}");
                }
            }
        }

        Ok(records)
    }
}

fn parse_record(path: &Path, bytes: &[u8]) -> Result<UserRecord> {
    serde_json::from_slice(bytes).map_err(|e| {
        UserError::CorruptRecord {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
