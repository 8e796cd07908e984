//! Per-user synchronized state
//!
//! Every user owns exactly one [`SyncData`] document holding their dotfile
//! contents and package list. The document is never merged: each push
//! replaces it, and a user who never pushed reads the empty default.

pub mod error;
pub mod store;
pub mod types;

pub use error::SyncError;
pub use store::SyncStore;
pub use types::{Package, SyncData};
