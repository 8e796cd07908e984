//! Registration input validation

use super::errors::UserError;
use crate::constants::MIN_PASSWORD_LENGTH;

/// Check an email against `local@domain.tld`.
///
/// - local part: one or more of `[A-Za-z0-9._%+-]`
/// - domain: one or more of `[A-Za-z0-9.-]`, then a final `.tld`
/// - tld: at least two ASCII letters
///
/// The local part is split at the first `@`, so any further `@` lands in
/// the domain and fails its character check.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-'))
    {
        return false;
    }

    // The TLD is the suffix after the last dot; the domain before it may
    // itself contain dots.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-'))
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Validate registration input. Runs before any side effect.
pub fn validate_registration(email: &str, password: &str) -> Result<(), UserError> {
    if !is_valid_email(email) {
        return Err(UserError::InvalidEmail);
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
