//! Cryptographic functions for the user system
//!
//! Provides password hashing and bearer token issuance using:
//! - Argon2id for password hashing, with tunable cost
//! - The operating system CSPRNG for tokens

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};
use base64ct::{Base64Url, Encoding};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroizing;

use super::errors::UserError;
use crate::Result;
use crate::constants::TOKEN_BYTES;

/// Argon2id cost parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashCost {
    /// Cheapest parameters Argon2 accepts. Only suitable for tests.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Configured Argon2id hasher.
#[derive(Clone, Debug)]
pub struct PasswordHashing {
    params: Params,
}

impl PasswordHashing {
    /// Validate the cost parameters and build a hasher.
    pub fn new(cost: HashCost) -> Result<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| UserError::InvalidHashCost {
                reason: e.to_string(),
            })?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Returns
    /// The Argon2 hash string (PHC format), which embeds salt and cost.
    pub fn hash_password(&self, password: impl AsRef<str>) -> Result<String> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let password_hash = self
            .argon2()
            .hash_password(password.as_ref().as_bytes(), &salt)
            .map_err(|e| UserError::HashingFailed {
                reason: e.to_string(),
            })?
            .to_string();

        Ok(password_hash)
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

/// Verify a password against its stored hash
///
/// Cost parameters are read from the hash itself, so hashes produced under an
/// earlier cost configuration keep verifying.
///
/// # Returns
/// Ok(()) if password is correct, `UserError::InvalidCredentials` otherwise
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|_| UserError::MalformedPasswordHash)?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| UserError::InvalidCredentials.into())
}

/// Issue a new bearer token: 256 random bits, URL-safe base64.
///
/// Fails rather than falling back when the OS entropy source is unavailable.
pub fn generate_token() -> Result<String> {
    let mut bytes = Zeroizing::new([0u8; TOKEN_BYTES]);
    OsRng
        .try_fill_bytes(&mut bytes[..])
        .map_err(|e| UserError::EntropyUnavailable {
            reason: e.to_string(),
        })?;
    Ok(Base64Url::encode_string(&bytes[..]))
}
