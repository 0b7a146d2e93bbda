//! An engine bound to a key.

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::claims::Claims;
use crate::config::TokenConfig;
use crate::engine::{Engine, TokenCodec};
use crate::error::Result;
use crate::keys::SecretKey;

/// Token service: one engine, one key.
///
/// Immutable after construction, so a single instance can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct TokenService {
    engine: Engine,
    key: SecretKey,
}

impl TokenService {
    /// Bind `engine` to `key`.
    #[must_use]
    pub fn new(engine: Engine, key: SecretKey) -> Self {
        Self { engine, key }
    }

    /// Select an engine by identifier and decode a hex key.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnknownAlgorithm` for an unknown identifier,
    /// or any error from [`SecretKey::from_hex`].
    pub fn from_hex(algorithm: &str, key_hex: &str) -> Result<Self> {
        let engine = Engine::new(algorithm)?;
        let key = SecretKey::from_hex(key_hex)?;
        Ok(Self::new(engine, key))
    }

    /// Build a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured key does not decode.
    pub fn from_config(config: &TokenConfig) -> Result<Self> {
        let key = config.secret_key()?;
        debug!(algorithm = %config.algorithm, "token service configured");
        Ok(Self::new(Engine::from_algorithm(config.algorithm), key))
    }

    /// Algorithm this service issues and accepts.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.engine.algorithm()
    }

    /// Issue a token for `claims`.
    ///
    /// # Errors
    ///
    /// See [`TokenCodec::generate`].
    pub fn generate(&self, claims: &Claims) -> Result<String> {
        self.engine.generate(claims, self.key.as_ref())
    }

    /// Authenticate and decrypt a token.
    ///
    /// # Errors
    ///
    /// See [`TokenCodec::parse`].
    pub fn parse(&self, token: &str) -> Result<Claims> {
        self.engine.parse(token, self.key.as_ref())
    }

    /// `true` iff [`parse`](Self::parse) succeeds.
    #[must_use]
    pub fn verify(&self, token: &str) -> bool {
        self.engine.verify(token, self.key.as_ref())
    }
}
