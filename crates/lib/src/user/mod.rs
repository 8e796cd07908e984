//! User system for Kiwi
//!
//! Provides password-based accounts: input validation, Argon2id hashing,
//! bearer token issuance and the file-backed credential store.

pub mod crypto;
pub mod errors;
pub mod store;
pub mod types;
pub mod validation;

pub use crypto::{HashCost, PasswordHashing, generate_token, verify_password};
pub use errors::UserError;
pub use store::CredentialStore;
pub use types::*;
