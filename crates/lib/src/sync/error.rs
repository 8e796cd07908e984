//! Error types for the sync store.

use thiserror::Error;

/// Errors reading or writing a user's sync document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SyncError {
    /// The pushed document failed validation.
    #[error("Invalid sync data: {reason}")]
    InvalidPayload { reason: String },

    /// The persisted document could not be parsed.
    #[error("Corrupt sync document {path}: {reason}")]
    CorruptDocument { path: String, reason: String },
}

impl SyncError {
    /// Check if this error is caused by invalid caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, SyncError::InvalidPayload { .. })
    }
}

impl From<SyncError> for crate::Error {
    fn from(err: SyncError) -> Self {
        crate::Error::Sync(err)
    }
}
