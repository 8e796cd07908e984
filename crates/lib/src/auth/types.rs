//! Resolved caller identities.

use crate::identity::IdentityKey;

/// The authenticated caller of a protected route.
///
/// Inserted into request extensions by the auth middleware.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    /// Holder of the process-wide admin credential.
    Admin,
    /// A registered user.
    User { email: String, identity: IdentityKey },
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin)
    }

    /// Storage partition this principal reads and writes.
    ///
    /// The admin has no per-user identity and is given its own fixed partition.
    pub fn partition(&self) -> IdentityKey {
        match self {
            Principal::Admin => IdentityKey::admin(),
            Principal::User { identity, .. } => identity.clone(),
        }
    }
}
