//! Bearer credential resolution
//!
//! Resolution order:
//! 1. match against the admin credential (digest compared in constant time) → [`Principal::Admin`]
//! 2. token index lookup, confirmed against the persisted record → [`Principal::User`]
//! 3. otherwise [`AuthError::InvalidToken`]
//!
//! Storage failures are returned as-is and never converted into
//! `InvalidToken`, so a broken disk is not reported as a bad token.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::errors::AuthError;
use super::index::TokenIndex;
use super::types::Principal;
use crate::Result;
use crate::constants::BEARER_PREFIX;
use crate::identity::IdentityKey;
use crate::user::CredentialStore;

/// Strip the optional `Bearer ` prefix from an Authorization header value.
pub fn strip_bearer(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value)
}

fn digest(secret: &str) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(Sha256::digest(secret.as_bytes()).into())
}

/// Equality whose running time does not depend on where the inputs differ.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub struct AuthResolver {
    admin_digest: Zeroizing<[u8; 32]>,
    index: TokenIndex,
    credentials: CredentialStore,
}

impl std::fmt::Debug for AuthResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResolver")
            .field("admin_token", &"<redacted>")
            .field("indexed_tokens", &self.index.len())
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl AuthResolver {
    /// Create a resolver with an empty index.
    ///
    /// Call [`AuthResolver::rebuild_index`] before serving requests.
    pub fn new(admin_token: impl Into<String>, credentials: CredentialStore) -> Result<Self> {
        let admin_token = Zeroizing::new(admin_token.into());
        if admin_token.is_empty() {
            return Err(AuthError::EmptyAdminToken.into());
        }
        Ok(Self {
            admin_digest: digest(&admin_token),
            index: TokenIndex::new(),
            credentials,
        })
    }

    /// Repopulate the token index from every persisted credential record.
    ///
    /// Returns the number of indexed tokens.
    pub async fn rebuild_index(&self) -> Result<usize> {
        let records = self.credentials.scan().await?;
        self.index.reset(&records);
        let count = self.index.len();
        tracing::info!("Indexed {count} active tokens");
        Ok(count)
    }

    /// Record a token issued for `identity`, revoking `previous`.
    pub fn token_issued(&self, previous: Option<&str>, token: &str, identity: &IdentityKey) {
        self.index.replace(previous, token, identity);
    }

    pub fn index(&self) -> &TokenIndex {
        &self.index
    }

    /// Resolve the raw Authorization header value to a principal.
    pub async fn resolve(&self, header: Option<&str>) -> Result<Principal> {
        let token = header.map(strip_bearer).unwrap_or_default();
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        if digests_match(&digest(token), &self.admin_digest) {
            tracing::debug!("resolved admin credential");
            return Ok(Principal::Admin);
        }

        let Some(identity) = self.index.get(token) else {
            return Err(AuthError::InvalidToken.into());
        };

        let record = match self.credentials.load(&identity).await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                self.index.remove(token);
                return Err(AuthError::InvalidToken.into());
            }
            Err(e) => return Err(e),
        };

        if record.token != token {
            // Replaced on disk since it was indexed.
            self.index.remove(token);
            return Err(AuthError::InvalidToken.into());
        }

        tracing::debug!(identity = %identity, "resolved user token");
        Ok(Principal::User {
            email: record.email,
            identity,
        })
    }
}
