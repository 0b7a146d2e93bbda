//! Claims payload.
//!
//! Claims are an arbitrary JSON object. No field is required or
//! interpreted here; a conventional `exp` is left to the caller.

use serde_json::{Map, Value};

use crate::error::{Result, TokenError};

/// Mapping from claim names to JSON values.
pub type Claims = Map<String, Value>;

/// Serialize claims to the bytes that get encrypted.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if serialization fails.
pub fn to_vec(claims: &Claims) -> Result<Vec<u8>> {
    serde_json::to_vec(claims).map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Deserialize a decrypted payload into claims.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if `bytes` is not a JSON object.
pub fn from_slice(bytes: &[u8]) -> Result<Claims> {
    serde_json::from_slice(bytes).map_err(|e| TokenError::Encoding(e.to_string()))
}
