//! HMAC-signed compact tokens: `header.ciphertext.signature`.

use std::fmt;
use std::marker::PhantomData;

use tessera_crypto::aead::{
    AeadCipher, ChaCha20Cipher, SealedBox, XChaCha20Cipher, open_detached, seal_detached,
};
use tessera_crypto::{encoding, mac};
use tracing::{debug, trace, warn};

use super::{TokenCodec, split_segments};
use crate::algorithm::Algorithm;
use crate::claims::{self, Claims};
use crate::error::{Result, TokenError};
use crate::header::{DIRECT, Header};

/// `enc` label for ChaCha20-Poly1305 tokens.
pub const ENC_C20P: &str = "C20P";

/// `enc` label for XChaCha20-Poly1305 tokens.
pub const ENC_XC20P: &str = "XC20P";

/// Direct-key engine over an AEAD strategy `C`.
///
/// The caller key is both the AEAD key and the HMAC key. Parsing checks
/// the signature before touching the cipher.
pub struct DirectEngine<C> {
    algorithm: Algorithm,
    enc: &'static str,
    _cipher: PhantomData<fn() -> C>,
}

/// ChaCha20-Poly1305 engine, 12-byte nonces.
pub type ChaCha20Engine = DirectEngine<ChaCha20Cipher>;

/// XChaCha20-Poly1305 engine, 24-byte nonces.
pub type XChaCha20Engine = DirectEngine<XChaCha20Cipher>;

impl<C: AeadCipher> DirectEngine<C> {
    /// Engine reporting `algorithm` and writing `enc` into headers.
    #[must_use]
    pub const fn with_enc(algorithm: Algorithm, enc: &'static str) -> Self {
        Self {
            algorithm,
            enc,
            _cipher: PhantomData,
        }
    }

    /// Content encryption label written into and required from headers.
    #[must_use]
    pub const fn enc(&self) -> &'static str {
        self.enc
    }
}

impl ChaCha20Engine {
    /// Create the ChaCha20-Poly1305 engine.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_enc(Algorithm::ChaCha20, ENC_C20P)
    }
}

impl Default for ChaCha20Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl XChaCha20Engine {
    /// Create the XChaCha20-Poly1305 engine.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_enc(Algorithm::XChaCha20, ENC_XC20P)
    }
}

impl Default for XChaCha20Engine {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: derives would demand the same traits of `C`.
impl<C> Clone for DirectEngine<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for DirectEngine<C> {}

impl<C> PartialEq for DirectEngine<C> {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.enc == other.enc
    }
}

impl<C> Eq for DirectEngine<C> {}

impl<C: AeadCipher> fmt::Debug for DirectEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectEngine")
            .field("cipher", &C::NAME)
            .field("enc", &self.enc)
            .finish()
    }
}

impl<C: AeadCipher> TokenCodec for DirectEngine<C> {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, claims: &Claims, key: &[u8]) -> Result<String> {
        let payload = claims::to_vec(claims)?;
        let cipher = C::from_key(key)?;

        let sealed = seal_detached(&cipher, &payload, &[])?;
        trace!(cipher = C::NAME, nonce_len = sealed.nonce.len(), "sealed claims");

        let header_b64 = Header::direct(self.enc, &sealed).encode()?;
        let cipher_b64 = encoding::encode(&sealed.ciphertext);
        let signature = mac::signature(key, &header_b64, &cipher_b64)?;

        debug!(algorithm = %self.algorithm, "generated token");
        Ok(format!("{header_b64}.{cipher_b64}.{signature}"))
    }

    fn parse(&self, token: &str, key: &[u8]) -> Result<Claims> {
        let [header_b64, cipher_b64, signature] = split_segments::<3>(token)?;
        let cipher = C::from_key(key)?;
        let header = Header::decode(header_b64)?;

        if !mac::verify_segments(key, header_b64, cipher_b64, signature) {
            warn!(algorithm = %self.algorithm, "token signature mismatch");
            return Err(TokenError::Signature);
        }

        if header.alg != DIRECT {
            return Err(TokenError::format(format!(
                "unexpected alg {:?}, expected {DIRECT:?}",
                header.alg
            )));
        }
        if header.enc != self.enc {
            return Err(TokenError::format(format!(
                "unexpected enc {:?}, expected {:?}",
                header.enc, self.enc
            )));
        }

        let nonce = header.nonce()?;
        if nonce.len() != C::NONCE_SIZE {
            return Err(TokenError::format(format!(
                "nonce is {} bytes, expected {}",
                nonce.len(),
                C::NONCE_SIZE
            )));
        }
        let tag = header.tag()?;
        let ciphertext = encoding::decode(cipher_b64)
            .map_err(|e| TokenError::format(format!("ciphertext segment: {e}")))?;
        let sealed = SealedBox::from_parts(nonce, ciphertext, &tag)
            .map_err(|e| TokenError::format(format!("header tag: {e}")))?;

        let plaintext = open_detached(&cipher, &sealed, &[])?;
        let claims = claims::from_slice(&plaintext)?;

        debug!(algorithm = %self.algorithm, "parsed token");
        Ok(claims)
    }
}
