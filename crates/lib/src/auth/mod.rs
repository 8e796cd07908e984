//! Bearer token authentication
//!
//! Turns the `Authorization` header of a request into a [`Principal`]:
//! either the holder of the static admin credential, or a registered user
//! whose current token matches.

pub mod errors;
pub mod index;
pub mod resolver;
pub mod types;

pub use errors::AuthError;
pub use index::TokenIndex;
pub use resolver::{AuthResolver, strip_bearer};
pub use types::Principal;
