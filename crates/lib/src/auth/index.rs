//! In-memory token index
//!
//! Maps each active bearer token to the identity that owns it, so that
//! authenticating a request costs one lookup and one record read instead of a
//! scan over every credential record. The index is rebuilt from disk at
//! startup and updated whenever a token is issued or replaced.
//!
//! # Concurrency
//!
//! The map is guarded by a [`RwLock`] that is only held for the duration of a
//! single map operation and never across an `.await`. Callers that replace a
//! user's token hold that identity's lock (see [`crate::locks`]), so the
//! remove-old/insert-new pair for one identity is never interleaved with
//! another replacement for the same identity.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::identity::IdentityKey;
use crate::user::UserRecord;

#[derive(Debug, Default)]
pub struct TokenIndex {
    tokens: RwLock<HashMap<String, IdentityKey>>,
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from persisted records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a UserRecord>) -> Self {
        let index = Self::new();
        index.reset(records);
        index
    }

    /// Replace the whole index with the tokens of the given records.
    pub fn reset<'a>(&self, records: impl IntoIterator<Item = &'a UserRecord>) {
        let map = records
            .into_iter()
            .filter(|r| !r.token.is_empty())
            .map(|r| (r.token.clone(), r.identity()))
            .collect();
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = map;
    }

    /// Identity owning a token, if indexed.
    pub fn get(&self, token: &str) -> Option<IdentityKey> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    /// Record a newly issued token, dropping the one it replaces.
    pub fn replace(&self, previous: Option<&str>, token: &str, identity: &IdentityKey) {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = previous {
            tokens.remove(previous);
        }
        tokens.insert(token.to_string(), identity.clone());
    }

    /// Drop a token, e.g. one found stale on lookup.
    pub fn remove(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }

    pub fn len(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
