//! Error types for instance setup and orchestration.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InstanceError {
    /// Configuration rejected at startup.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A blocking worker (password hashing) panicked or was cancelled.
    #[error("Background task failed: {reason}")]
    TaskFailed { reason: String },
}

impl InstanceError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, InstanceError::InvalidConfig { .. })
    }
}

impl From<InstanceError> for crate::Error {
    fn from(err: InstanceError) -> Self {
        crate::Error::Instance(err)
    }
}

impl From<tokio::task::JoinError> for InstanceError {
    fn from(err: tokio::task::JoinError) -> Self {
        InstanceError::TaskFailed {
            reason: err.to_string(),
        }
    }
}
