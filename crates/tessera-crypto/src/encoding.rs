//! Base64url segment codec (RFC 4648 §5, no padding).
//!
//! Decoding is strict: padding characters, characters outside the URL-safe
//! alphabet and non-canonical trailing bits are all rejected, so every
//! accepted segment has exactly one byte representation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::CryptoError;

/// Encode bytes as an unpadded base64url string.
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode an unpadded base64url string.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidEncoding`] if `input` is not canonical
/// unpadded base64url.
pub fn decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))
}
