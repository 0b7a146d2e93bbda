//! Caller-supplied symmetric keys.

use std::fmt;
use std::str::FromStr;

use tessera_crypto::{CryptoError, KEY_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, TokenError};

/// 256-bit token key, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_SIZE]);

impl SecretKey {
    /// Wrap raw key bytes.
    #[must_use]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy a key out of a slice.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Crypto(InvalidKeyLength)` unless `bytes` is
    /// exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }

    /// Decode a hex-encoded key (64 hex digits).
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Config` for invalid hex and
    /// `TokenError::Crypto(InvalidKeyLength)` for a wrong decoded length.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(encoded.trim())
                .map_err(|e| TokenError::Config(format!("key is not valid hex: {e}")))?,
        );
        Self::from_slice(&bytes)
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for SecretKey {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "bdacaf398071931518f73917cb0c6f04b3a0ab45ee9cbedc258047a8c149a3e1";

    #[test]
    fn test_from_hex() {
        let key = SecretKey::from_hex(HEX).unwrap();
        assert_eq!(key.as_bytes()[0], 0xbd);
        assert_eq!(key.as_bytes()[31], 0xe1);
        assert_eq!(HEX.parse::<SecretKey>().unwrap().as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_from_hex_accepts_uppercase_and_whitespace() {
        let upper = format!("  {}\n", HEX.to_uppercase());
        let key = SecretKey::from_hex(&upper).unwrap();
        assert_eq!(key.as_bytes(), SecretKey::from_hex(HEX).unwrap().as_bytes());
    }

    #[test]
    fn test_invalid_hex_is_config_error() {
        assert!(matches!(SecretKey::from_hex("zz"), Err(TokenError::Config(_))));
        assert!(matches!(SecretKey::from_hex("abc"), Err(TokenError::Config(_))));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            SecretKey::from_hex("00112233").unwrap_err(),
            TokenError::Crypto(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 4
            })
        );
        assert!(SecretKey::from_slice(&[0u8; 33]).is_err());
        assert!(SecretKey::from_slice(&[]).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SecretKey::new([0xAB; 32]);
        let debug = format!("{key:?}");
        assert_eq!(debug, "SecretKey([REDACTED])");
        assert!(!debug.to_lowercase().contains("ab"));
    }

    #[test]
    fn test_zeroize() {
        let mut key = SecretKey::new([0xFF; 32]);
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; 32]);
    }
}
