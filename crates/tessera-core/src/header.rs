//! Header shared by the HMAC-signed compact formats.
//!
//! Serialized as `{"alg","enc","iv","tag"}` in that order, then base64url
//! encoded as the first token segment. `iv` and `tag` are themselves
//! base64url encodings of the nonce and AEAD tag.

use serde::{Deserialize, Serialize};
use tessera_crypto::aead::SealedBox;
use tessera_crypto::encoding;

use crate::error::{Result, TokenError};

/// Key management mode for the compact formats: the caller key is used
/// directly as the content key.
pub const DIRECT: &str = "dir";

/// Compact token header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Key management algorithm, always `"dir"` for the compact formats.
    pub alg: String,
    /// Content encryption label (`"C20P"` or `"XC20P"`).
    pub enc: String,
    /// Base64url nonce.
    pub iv: String,
    /// Base64url authentication tag.
    pub tag: String,
}

impl Header {
    /// Build a direct-mode header describing one sealed payload.
    #[must_use]
    pub fn direct(enc: &str, sealed: &SealedBox) -> Self {
        Self {
            alg: DIRECT.to_string(),
            enc: enc.to_string(),
            iv: encoding::encode(&sealed.nonce),
            tag: encoding::encode(sealed.tag.as_bytes()),
        }
    }

    /// Serialize to JSON and encode as a token segment.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] if JSON serialization fails.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self).map_err(|e| TokenError::Encoding(e.to_string()))?;
        Ok(encoding::encode(json))
    }

    /// Decode a header segment.
    ///
    /// Members other than the four known ones are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Format`] if the segment is not base64url or
    /// does not hold a header object.
    pub fn decode(segment: &str) -> Result<Self> {
        let json = encoding::decode(segment)
            .map_err(|e| TokenError::format(format!("header segment: {e}")))?;
        serde_json::from_slice(&json).map_err(|e| TokenError::format(format!("header JSON: {e}")))
    }

    /// Decoded nonce bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Format`] if `iv` is not base64url.
    pub fn nonce(&self) -> Result<Vec<u8>> {
        encoding::decode(&self.iv).map_err(|e| TokenError::format(format!("header iv: {e}")))
    }

    /// Decoded tag bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Format`] if `tag` is not base64url.
    pub fn tag(&self) -> Result<Vec<u8>> {
        encoding::decode(&self.tag).map_err(|e| TokenError::format(format!("header tag: {e}")))
    }
}
