//! Algorithm identifiers accepted by the engine selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Identifier for the AES-256-GCM key-wrap engine.
pub const AES_GCM_256: &str = "AES-GCM-256";

/// Identifier for the ChaCha20-Poly1305 engine.
pub const CHACHA20: &str = "ChaCha20";

/// Identifier for the XChaCha20-Poly1305 engine.
pub const XCHACHA20: &str = "XChaCha20";

/// Token algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// AES-256-GCM with key wrap, standard 5-segment JWE.
    #[default]
    #[serde(rename = "AES-GCM-256")]
    AesGcm256,
    /// ChaCha20-Poly1305, 3-segment HMAC-signed format.
    #[serde(rename = "ChaCha20")]
    ChaCha20,
    /// XChaCha20-Poly1305, 3-segment HMAC-signed format.
    #[serde(rename = "XChaCha20")]
    XChaCha20,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 3] = [Self::AesGcm256, Self::ChaCha20, Self::XChaCha20];

    /// Identifier string used for selection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AesGcm256 => AES_GCM_256,
            Self::ChaCha20 => CHACHA20,
            Self::XChaCha20 => XCHACHA20,
        }
    }

    /// Number of dot-separated segments in tokens of this algorithm.
    #[must_use]
    pub const fn segment_count(self) -> usize {
        match self {
            Self::AesGcm256 => 5,
            Self::ChaCha20 | Self::XChaCha20 => 3,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AES_GCM_256 => Ok(Self::AesGcm256),
            CHACHA20 => Ok(Self::ChaCha20),
            XCHACHA20 => Ok(Self::XChaCha20),
            other => Err(TokenError::UnknownAlgorithm(other.to_string())),
        }
    }
}
