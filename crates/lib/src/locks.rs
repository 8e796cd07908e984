//! Per-identity serialization
//!
//! Register, login and sync push are read-modify-write sequences on one
//! identity's files. Holding that identity's lock for the whole sequence
//! makes concurrent requests for the same user run one after another, while
//! requests for different users never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::identity::IdentityKey;

#[derive(Debug, Default)]
pub struct IdentityLocks {
    locks: Mutex<HashMap<IdentityKey, Arc<AsyncMutex<()>>>>,
}

/// Held while an identity's files are being mutated.
pub type IdentityGuard = OwnedMutexGuard<()>;

impl IdentityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to an identity.
    pub async fn lock(&self, key: &IdentityKey) -> IdentityGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on can go.
            locks.retain(|_, l| Arc::strong_count(l) > 1);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of identities with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
