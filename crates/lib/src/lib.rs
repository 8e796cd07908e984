//!
//! Kiwi: the sync server behind the `kiwi` dotfile manager.
//!
//! Users register with an email and password, receive a bearer token, and
//! push or pull a single JSON document holding their dotfiles and package
//! list. Everything is stored as flat files on disk.
//!
//! ## Core Concepts
//!
//! * **Identity keys (`identity::IdentityKey`)**: A one-way digest of the email that
//!   names both the user's credential record and their storage directory.
//! * **Credential store (`user::CredentialStore`)**: One JSON record per user holding the
//!   Argon2id password hash and the single active token.
//! * **Sync store (`sync::SyncStore`)**: One `SyncData` document per user, replaced
//!   wholesale on every push.
//! * **Auth resolver (`auth::AuthResolver`)**: Maps an `Authorization` header to the admin
//!   or to a user through an in-memory token index.
//! * **Rate limiter (`ratelimit::RateLimiter`)**: One token bucket guarding the whole process.
//! * **Instance (`instance::Instance`)**: Ties the above together and implements
//!   register, login, pull and push.
//! * **Server (`server`)**: The axum router, middleware chain and graceful shutdown.

pub mod auth;
pub mod clock;
pub mod constants;
pub mod identity;
pub mod instance;
pub mod locks;
pub mod ratelimit;
pub mod server;
pub mod sync;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use instance::{Instance, InstanceConfig};

/// Result type used throughout the Kiwi library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Kiwi library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured user errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured authentication errors from the auth module
    #[error(transparent)]
    Auth(auth::AuthError),

    /// Structured sync errors from the sync module
    #[error(transparent)]
    Sync(sync::SyncError),

    /// Structured instance errors from the instance module
    #[error(transparent)]
    Instance(instance::InstanceError),

    /// The global rate limiter has no tokens left
    #[error("Too many requests")]
    RateLimited,
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::User(_) => "user",
            Error::Auth(_) => "auth",
            Error::Sync(_) => "sync",
            Error::Instance(_) => "instance",
            Error::RateLimited => "ratelimit",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_not_found(),
            Error::Io(io_err) => io_err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is caused by invalid caller input.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_validation_error(),
            Error::Sync(sync_err) => sync_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error means the caller failed to authenticate.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_unauthorized(),
            Error::User(user_err) => user_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error is a rate-limit rejection.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }

    /// Check if this error is a startup configuration problem.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_configuration_error(),
            Error::Instance(instance_err) => instance_err.is_configuration_error(),
            Error::User(user::UserError::InvalidHashCost { .. }) => true,
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
