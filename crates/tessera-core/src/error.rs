//! Error types for token generation and parsing.

use tessera_crypto::CryptoError;
use thiserror::Error;

/// Token errors.
///
/// `generate` and `parse` surface the specific variant; `verify` collapses
/// all of them into `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Claims could not be serialized, or a decrypted payload is not a
    /// JSON object.
    #[error("claims encoding error: {0}")]
    Encoding(String),

    /// Wrong segment count, invalid base64url or malformed header.
    #[error("invalid token format: {0}")]
    Format(String),

    /// HMAC over the header and ciphertext segments did not match.
    #[error("invalid token signature")]
    Signature,

    /// Key wrap, seal or open failure (including wrong key length).
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Algorithm identifier not recognized by the engine selector.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Invalid configuration (key encoding, missing settings).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

impl TokenError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
