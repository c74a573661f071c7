//! Key validation.
//!
//! Keys end up as file names on the local backend and object names on S3,
//! so they are restricted to a conservative character set that is safe on
//! both and can never escape the storage root.

use crate::error::{ErrorKind, Result};

/// Longest accepted key, in bytes.
const MAX_KEY_LENGTH: usize = 128;

/// Validates a cache key.
///
/// # Returns
/// Returns the key unchanged if valid, or [`InvalidKey`](crate::error::ErrorKind::InvalidKey)
/// if it is empty, too long, or contains anything outside `[A-Za-z0-9_-]`.
///
/// # Examples
///
/// ```
/// use skinwatch_storage::validate_key;
/// assert!(validate_key("persistentVars").is_ok());
/// assert!(validate_key("skin-lines_2").is_ok());
/// assert!(validate_key("../etc/passwd").is_err());
/// assert!(validate_key("").is_err());
/// ```
pub fn validate(key: &str) -> Result<&str> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        exn::bail!(ErrorKind::InvalidKey(key.to_string()));
    }
    if !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
        exn::bail!(ErrorKind::InvalidKey(key.to_string()));
    }
    Ok(key)
}
