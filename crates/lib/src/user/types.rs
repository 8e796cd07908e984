//! Core data types for the user system

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::identity::IdentityKey;

/// Credential record persisted as `<users_dir>/<identity>.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Email as supplied at registration (the identity source)
    pub email: String,

    /// Argon2id hash in PHC string format
    pub password_hash: String,

    /// Currently active bearer token. Replaced on every login.
    pub token: String,

    /// Creation timestamp (RFC3339)
    pub created_at: String,
}

impl UserRecord {
    pub fn identity(&self) -> IdentityKey {
        IdentityKey::from_email(&self.email)
    }
}

/// User as returned to clients: the record without the password hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub token: String,
    pub created_at: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            email: record.email,
            token: record.token,
            created_at: record.created_at,
        }
    }
}

/// Body of `POST /register` and `POST /login`.
///
/// The password is wiped from memory when the request is dropped.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
