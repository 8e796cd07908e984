//! Authentication error types.

use thiserror::Error as ThisError;

use crate::Error;

/// Errors produced while resolving a bearer credential.
///
/// Storage failures during resolution are not represented here; they surface
/// as I/O or user errors so that callers report them as internal failures
/// rather than as a rejected token.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum AuthError {
    /// No Authorization header, or an empty one.
    #[error("No token provided")]
    MissingToken,

    /// The presented token matches neither the admin credential nor any user.
    #[error("Invalid token")]
    InvalidToken,

    /// The admin credential was configured empty.
    #[error("Admin credential must not be empty")]
    EmptyAdminToken,
}

impl AuthError {
    /// Check if this error should be reported to the caller as unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthError::MissingToken | AuthError::InvalidToken)
    }

    /// Check if this error indicates a configuration problem.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, AuthError::EmptyAdminToken)
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Auth(err)
    }
}
