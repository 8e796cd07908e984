//! Identity addressing
//!
//! Maps an email to an opaque, fixed-length, filesystem-safe storage key.
//! The key names both the credential record (`<users_dir>/<key>.json`) and
//! the per-user data directory (`<data_dir>/<key>/`), so raw emails never
//! reach the filesystem namespace.

use std::fmt;

use base64ct::{Base64Url, Encoding};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of an encoded identity key (padded base64 of a SHA-256 digest).
pub const IDENTITY_KEY_LENGTH: usize = 44;

/// One-way digest of an email used as a storage address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Derive the key for an email.
    ///
    /// The email is hashed byte-for-byte; no trimming or case folding.
    pub fn from_email(email: &str) -> Self {
        let digest = Sha256::digest(email.as_bytes());
        Self(Base64Url::encode_string(&digest))
    }

    /// Partition used when the admin credential reaches per-user routes.
    ///
    /// This is the digest of the empty string, which no valid email produces.
    pub fn admin() -> Self {
        Self::from_email("")
    }

    /// Parse a key read back from the filesystem.
    ///
    /// Returns `None` unless the value has the exact shape produced by
    /// [`IdentityKey::from_email`].
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == IDENTITY_KEY_LENGTH
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'='));
        well_formed.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
