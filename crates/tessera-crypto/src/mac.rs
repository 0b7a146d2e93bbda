//! HMAC-SHA256 signatures over encoded token segments.
//!
//! The signed message is the UTF-8 text `first + "." + second`, where both
//! parts are already base64url-encoded segments. Raw bytes are never
//! concatenated.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constant_time::ct_eq;
use crate::{CryptoError, KEY_SIZE, MAC_SIZE, encoding};

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over `first.second`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] if the MAC rejects the key.
pub fn sign_segments(key: &[u8], first: &str, second: &str) -> Result<[u8; MAC_SIZE], CryptoError> {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: key.len(),
        })?;
    mac.update(first.as_bytes());
    mac.update(b".");
    mac.update(second.as_bytes());

    let mut out = [0u8; MAC_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Compute the base64url-encoded signature segment for `first.second`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] if the MAC rejects the key.
pub fn signature(key: &[u8], first: &str, second: &str) -> Result<String, CryptoError> {
    sign_segments(key, first, second).map(encoding::encode)
}

/// Check a received signature segment against `first.second`.
///
/// The comparison is constant-time over the encoded segment, so a
/// signature that decodes to the right bytes through a non-canonical
/// encoding is still rejected.
#[must_use]
pub fn verify_segments(key: &[u8], first: &str, second: &str, received: &str) -> bool {
    match signature(key, first, second) {
        Ok(expected) => ct_eq(expected.as_bytes(), received.as_bytes()),
        Err(_) => false,
    }
}
