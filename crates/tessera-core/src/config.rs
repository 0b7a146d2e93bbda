//! Token configuration.
//!
//! ```toml
//! algorithm = "XChaCha20"
//! key = "bdacaf398071931518f73917cb0c6f04b3a0ab45ee9cbedc258047a8c149a3e1"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithm::Algorithm;
use crate::error::{Result, TokenError};
use crate::keys::SecretKey;

/// Environment variable holding the algorithm identifier.
pub const ENV_ALGORITHM: &str = "TESSERA_ALGORITHM";

/// Environment variable holding the hex-encoded key.
pub const ENV_KEY: &str = "TESSERA_KEY";

/// Algorithm and key for a [`TokenService`](crate::TokenService).
///
/// The hex key is wiped when the configuration is dropped.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct TokenConfig {
    /// Token algorithm
    #[serde(default)]
    #[zeroize(skip)]
    pub algorithm: Algorithm,
    /// Key as 64 hex digits
    pub key: String,
}

impl TokenConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Config` if the text is not valid TOML, names an
    /// unknown algorithm, or lacks a key.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TokenError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Config` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| TokenError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Read `TESSERA_ALGORITHM` (optional) and `TESSERA_KEY` from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Config` if the key is missing and
    /// `TokenError::UnknownAlgorithm` for an unrecognized algorithm.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let algorithm = match lookup(ENV_ALGORITHM) {
            Some(value) => value.parse()?,
            None => Algorithm::default(),
        };
        let key = lookup(ENV_KEY).ok_or_else(|| TokenError::Config(format!("{ENV_KEY} is not set")))?;

        Ok(Self { algorithm, key })
    }

    /// Decode the configured key.
    ///
    /// # Errors
    ///
    /// See [`SecretKey::from_hex`].
    pub fn secret_key(&self) -> Result<SecretKey> {
        SecretKey::from_hex(&self.key)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error unless the key decodes to 32 bytes.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(TokenError::Config("key is empty".into()));
        }
        self.secret_key().map(drop)
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
