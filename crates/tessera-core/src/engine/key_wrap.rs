//! AES-256-GCM key wrap in JWE compact serialization.
//!
//! ```text
//! BASE64URL(protected) . BASE64URL(wrapped CEK) . BASE64URL(iv)
//!     . BASE64URL(ciphertext) . BASE64URL(tag)
//! ```
//!
//! A random 256-bit content key (CEK) encrypts the claims with AES-256-GCM,
//! using the ASCII of the encoded protected header as AAD. The CEK itself
//! is sealed under the caller key with AES-256-GCM; that nonce and tag
//! travel in the protected header as `iv` and `tag`.

use serde::{Deserialize, Serialize};
use tessera_crypto::aead::{Aes256GcmCipher, AeadCipher, SealedBox, open_detached, seal_detached};
use tessera_crypto::random::random_bytes;
use tessera_crypto::{CryptoError, KEY_SIZE, encoding};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::{TokenCodec, split_segments};
use crate::algorithm::Algorithm;
use crate::claims::{self, Claims};
use crate::error::{Result, TokenError};

/// JWE `alg` for AES-256-GCM key wrapping.
pub const KEY_WRAP_ALG: &str = "A256GCMKW";

/// JWE `enc` for AES-256-GCM content encryption.
pub const CONTENT_ENC: &str = "A256GCM";

#[derive(Debug, Serialize, Deserialize)]
struct ProtectedHeader {
    alg: String,
    enc: String,
    iv: String,
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zip: Option<String>,
}

/// `A256GCMKW` + `A256GCM` engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyWrapEngine;

impl KeyWrapEngine {
    /// Create the key-wrap engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>> {
    encoding::decode(segment).map_err(|e| TokenError::format(format!("{name}: {e}")))
}

/// Recover the content key. Every failure past this point reads the same.
fn unwrap_cek(
    kek: &Aes256GcmCipher,
    header: &ProtectedHeader,
    wrapped: Vec<u8>,
) -> std::result::Result<Zeroizing<Vec<u8>>, CryptoError> {
    let nonce = encoding::decode(&header.iv).map_err(|_| CryptoError::DecryptionFailed)?;
    let tag = encoding::decode(&header.tag).map_err(|_| CryptoError::DecryptionFailed)?;
    let sealed =
        SealedBox::from_parts(nonce, wrapped, &tag).map_err(|_| CryptoError::DecryptionFailed)?;

    let cek = Zeroizing::new(open_detached(kek, &sealed, &[]).map_err(|_| CryptoError::DecryptionFailed)?);
    if cek.len() != KEY_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }
    Ok(cek)
}

impl TokenCodec for KeyWrapEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AesGcm256
    }

    fn generate(&self, claims: &Claims, key: &[u8]) -> Result<String> {
        let payload = claims::to_vec(claims)?;
        let kek = Aes256GcmCipher::from_key(key)?;

        let cek = Zeroizing::new(random_bytes::<KEY_SIZE>()?);
        let wrapped = seal_detached(&kek, cek.as_slice(), &[])?;

        let header = ProtectedHeader {
            alg: KEY_WRAP_ALG.to_string(),
            enc: CONTENT_ENC.to_string(),
            iv: encoding::encode(&wrapped.nonce),
            tag: encoding::encode(wrapped.tag.as_bytes()),
            zip: None,
        };
        let header_json =
            serde_json::to_vec(&header).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let header_b64 = encoding::encode(header_json);

        let content = Aes256GcmCipher::from_key(cek.as_slice())?;
        let sealed = seal_detached(&content, &payload, header_b64.as_bytes())?;
        trace!(nonce_len = sealed.nonce.len(), "sealed claims under content key");

        debug!(algorithm = %Algorithm::AesGcm256, "generated token");
        Ok([
            header_b64,
            encoding::encode(&wrapped.ciphertext),
            encoding::encode(&sealed.nonce),
            encoding::encode(&sealed.ciphertext),
            encoding::encode(sealed.tag.as_bytes()),
        ]
        .join("."))
    }

    fn parse(&self, token: &str, key: &[u8]) -> Result<Claims> {
        let [header_b64, wrapped_b64, iv_b64, cipher_b64, tag_b64] = split_segments::<5>(token)?;
        let kek = Aes256GcmCipher::from_key(key)?;

        let header_json = decode_segment(header_b64, "protected header")?;
        let header: ProtectedHeader = serde_json::from_slice(&header_json)
            .map_err(|e| TokenError::format(format!("protected header JSON: {e}")))?;

        if header.alg != KEY_WRAP_ALG || header.enc != CONTENT_ENC {
            return Err(TokenError::format(format!(
                "unsupported alg/enc {}/{}, expected {KEY_WRAP_ALG}/{CONTENT_ENC}",
                header.alg, header.enc
            )));
        }
        if let Some(zip) = &header.zip {
            return Err(TokenError::format(format!("unsupported zip {zip:?}")));
        }

        let wrapped = decode_segment(wrapped_b64, "encrypted key")?;
        let iv = decode_segment(iv_b64, "iv")?;
        let ciphertext = decode_segment(cipher_b64, "ciphertext")?;
        let tag = decode_segment(tag_b64, "tag")?;

        let cek = unwrap_cek(&kek, &header, wrapped)?;
        let content = Aes256GcmCipher::from_key(cek.as_slice())?;

        let plaintext = SealedBox::from_parts(iv, ciphertext, &tag)
            .and_then(|sealed| open_detached(&content, &sealed, header_b64.as_bytes()))
            .map_err(|_| CryptoError::DecryptionFailed)?;
        let claims = claims::from_slice(&plaintext)?;

        debug!(algorithm = %Algorithm::AesGcm256, "parsed token");
        Ok(claims)
    }
}
