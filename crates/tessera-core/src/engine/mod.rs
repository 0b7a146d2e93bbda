//! Token engines and the engine selector.
//!
//! Every engine implements [`TokenCodec`]. Two trust models are in play:
//!
//! - [`KeyWrapEngine`]: standard JWE (`A256GCMKW` + `A256GCM`). The AEAD
//!   tags are the only authenticators.
//! - [`DirectEngine`]: compact `header.ciphertext.signature` tokens. An
//!   HMAC-SHA256 over the encoded header and ciphertext is checked before
//!   any decryption; the AEAD tag then authenticates a second time.
//!
//! [`Engine`] is the closed set of supported engines, selected by
//! identifier.

mod direct;
mod key_wrap;

pub use direct::{ChaCha20Engine, DirectEngine, ENC_C20P, ENC_XC20P, XChaCha20Engine};
pub use key_wrap::{CONTENT_ENC, KEY_WRAP_ALG, KeyWrapEngine};

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::claims::Claims;
use crate::error::Result;

/// Generate, parse and verify tokens under a caller-supplied key.
///
/// Implementations are stateless: every call draws its own nonce and
/// buffers, so one instance can be shared across threads.
pub trait TokenCodec {
    /// Algorithm implemented by this engine.
    fn algorithm(&self) -> Algorithm;

    /// Encrypt `claims` into a token string.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if the claims cannot be serialized
    /// and `TokenError::Crypto` for a bad key or a cipher failure.
    fn generate(&self, claims: &Claims, key: &[u8]) -> Result<String>;

    /// Authenticate and decrypt a token back into claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Format`, `TokenError::Signature`,
    /// `TokenError::Crypto` or `TokenError::Encoding`.
    fn parse(&self, token: &str, key: &[u8]) -> Result<Claims>;

    /// `true` iff [`parse`](Self::parse) succeeds. Never fails.
    fn verify(&self, token: &str, key: &[u8]) -> bool {
        match self.parse(token, key) {
            Ok(_) => true,
            Err(e) => {
                debug!(algorithm = %self.algorithm(), error = %e, "token verification failed");
                false
            }
        }
    }
}

/// Engine bound to one supported algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// AES-256-GCM key wrap, 5-segment JWE.
    AesGcm256(KeyWrapEngine),
    /// ChaCha20-Poly1305, 3-segment signed format.
    ChaCha20(ChaCha20Engine),
    /// XChaCha20-Poly1305, 3-segment signed format.
    XChaCha20(XChaCha20Engine),
}

impl Engine {
    /// Select an engine by identifier (`"AES-GCM-256"`, `"ChaCha20"`,
    /// `"XChaCha20"`).
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnknownAlgorithm` for any other identifier.
    pub fn new(identifier: &str) -> Result<Self> {
        identifier.parse().map(Self::from_algorithm)
    }

    /// Engine for an already-parsed algorithm.
    #[must_use]
    pub const fn from_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::AesGcm256 => Self::AesGcm256(KeyWrapEngine::new()),
            Algorithm::ChaCha20 => Self::ChaCha20(ChaCha20Engine::new()),
            Algorithm::XChaCha20 => Self::XChaCha20(XChaCha20Engine::new()),
        }
    }

    fn codec(&self) -> &dyn TokenCodec {
        match self {
            Self::AesGcm256(engine) => engine,
            Self::ChaCha20(engine) => engine,
            Self::XChaCha20(engine) => engine,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_algorithm(Algorithm::default())
    }
}

impl From<Algorithm> for Engine {
    fn from(algorithm: Algorithm) -> Self {
        Self::from_algorithm(algorithm)
    }
}

impl TokenCodec for Engine {
    fn algorithm(&self) -> Algorithm {
        self.codec().algorithm()
    }

    fn generate(&self, claims: &Claims, key: &[u8]) -> Result<String> {
        self.codec().generate(claims, key)
    }

    fn parse(&self, token: &str, key: &[u8]) -> Result<Claims> {
        self.codec().parse(token, key)
    }
}

/// Split a token into exactly `N` dot-separated segments.
pub(crate) fn split_segments<const N: usize>(token: &str) -> Result<[&str; N]> {
    let mut segments = [""; N];
    let mut count = 0;

    for part in token.split('.') {
        if count < N {
            segments[count] = part;
        }
        count += 1;
    }

    if count != N {
        return Err(crate::error::TokenError::format(format!(
            "expected {N} segments, found {count}"
        )));
    }

    Ok(segments)
}
