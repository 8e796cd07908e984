//! Error types for the user system
use thiserror::Error;

use crate::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {identity}")]
    UserNotFound { identity: String },

    #[error("User already exists")]
    UserAlreadyExists,

    /// Login failure. Deliberately identical for unknown users and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },

    #[error("Stored password hash is malformed")]
    MalformedPasswordHash,

    #[error("Invalid hash cost parameters: {reason}")]
    InvalidHashCost { reason: String },

    #[error("Entropy source failure: {reason}")]
    EntropyUnavailable { reason: String },

    #[error("Corrupt credential record {path}: {reason}")]
    CorruptRecord { path: String, reason: String },
}

impl UserError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::UserNotFound { .. })
    }

    /// Check if this error indicates the user already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::UserAlreadyExists)
    }

    /// Check if this error is caused by invalid caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            UserError::InvalidEmail | UserError::PasswordTooShort { .. }
        )
    }

    /// Check if this error is an authentication failure.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, UserError::InvalidCredentials)
    }
}

impl From<UserError> for Error {
    fn from(err: UserError) -> Self {
        Error::User(err)
    }
}
