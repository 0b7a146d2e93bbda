//! AEAD strategies.
//!
//! Each strategy wraps one authenticated cipher and knows its nonce and tag
//! sizes. Token engines only see the [`AeadCipher`] interface:
//!
//! - `seal(nonce, plaintext, aad) -> ciphertext || tag`
//! - `open(nonce, ciphertext || tag, aad) -> plaintext`
//!
//! [`seal_detached`] and [`open_detached`] add the nonce handling used by
//! token layouts that carry the nonce, ciphertext and tag in separate fields.
//!
//! ## Usage
//!
//! ```ignore
//! use tessera_crypto::aead::{AeadCipher, ChaCha20Cipher, seal_detached, open_detached};
//!
//! let cipher = ChaCha20Cipher::from_key(&key)?;
//! let sealed = seal_detached(&cipher, b"secret", b"")?;
//! let plaintext = open_detached(&cipher, &sealed, b"")?;
//! ```

use aes_gcm::Aes256Gcm;
use chacha20poly1305::aead::generic_array::typenum::Unsigned;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, XChaCha20Poly1305};

use crate::random::random_vec;
use crate::{CHACHA_NONCE_SIZE, CryptoError, GCM_NONCE_SIZE, KEY_SIZE, TAG_SIZE, XCHACHA_NONCE_SIZE};

/// Authenticated cipher capability.
///
/// Implementors append a fixed-size tag on `seal` and expect it at the end
/// of the input on `open`.
pub trait AeadCipher: Sized {
    /// Human-readable algorithm name.
    const NAME: &'static str;

    /// Nonce size in bytes.
    const NONCE_SIZE: usize;

    /// Authentication tag size in bytes.
    const TAG_SIZE: usize = TAG_SIZE;

    /// Build the cipher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is not 32 bytes.
    fn from_key(key: &[u8]) -> Result<Self, CryptoError>;

    /// Encrypt `plaintext`, returning `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidNonceLength`] for a nonce of the wrong
    /// size and [`CryptoError::EncryptionFailed`] if the cipher fails.
    fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt and authenticate `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidNonceLength`] for a nonce of the wrong
    /// size and [`CryptoError::DecryptionFailed`] on authentication failure.
    fn open(
        &self,
        nonce: &[u8],
        ciphertext_and_tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}

fn check_key(key: &[u8]) -> Result<(), CryptoError> {
    if key.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: key.len(),
        });
    }
    Ok(())
}

fn check_nonce<A: AeadCore>(nonce: &[u8]) -> Result<(), CryptoError> {
    let expected = <A::NonceSize as Unsigned>::USIZE;
    if nonce.len() != expected {
        return Err(CryptoError::InvalidNonceLength {
            expected,
            actual: nonce.len(),
        });
    }
    Ok(())
}

fn seal_with<A: Aead>(
    cipher: &A,
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    check_nonce::<A>(nonce)?;

    cipher
        .encrypt(
            chacha20poly1305::aead::Nonce::<A>::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| CryptoError::EncryptionFailed)
}

fn open_with<A: Aead>(
    cipher: &A,
    nonce: &[u8],
    ciphertext_and_tag: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    check_nonce::<A>(nonce)?;

    if ciphertext_and_tag.len() < TAG_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    cipher
        .decrypt(
            chacha20poly1305::aead::Nonce::<A>::from_slice(nonce),
            Payload {
                msg: ciphertext_and_tag,
                aad,
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// AES-256-GCM strategy.
pub struct Aes256GcmCipher {
    cipher: Aes256Gcm,
}

impl AeadCipher for Aes256GcmCipher {
    const NAME: &'static str = "AES-256-GCM";
    const NONCE_SIZE: usize = GCM_NONCE_SIZE;

    fn from_key(key: &[u8]) -> Result<Self, CryptoError> {
        check_key(key)?;
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        seal_with(&self.cipher, nonce, plaintext, aad)
    }

    fn open(
        &self,
        nonce: &[u8],
        ciphertext_and_tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        open_with(&self.cipher, nonce, ciphertext_and_tag, aad)
    }
}

/// ChaCha20-Poly1305 strategy (RFC 8439).
pub struct ChaCha20Cipher {
    cipher: ChaCha20Poly1305,
}

impl AeadCipher for ChaCha20Cipher {
    const NAME: &'static str = "ChaCha20-Poly1305";
    const NONCE_SIZE: usize = CHACHA_NONCE_SIZE;

    fn from_key(key: &[u8]) -> Result<Self, CryptoError> {
        check_key(key)?;
        let cipher =
            ChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: key.len(),
            })?;
        Ok(Self { cipher })
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        seal_with(&self.cipher, nonce, plaintext, aad)
    }

    fn open(
        &self,
        nonce: &[u8],
        ciphertext_and_tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        open_with(&self.cipher, nonce, ciphertext_and_tag, aad)
    }
}

/// `XChaCha20-Poly1305` strategy.
///
/// The 192-bit nonce makes random nonce collisions negligible.
pub struct XChaCha20Cipher {
    cipher: XChaCha20Poly1305,
}

impl AeadCipher for XChaCha20Cipher {
    const NAME: &'static str = "XChaCha20-Poly1305";
    const NONCE_SIZE: usize = XCHACHA_NONCE_SIZE;

    fn from_key(key: &[u8]) -> Result<Self, CryptoError> {
        check_key(key)?;
        let cipher =
            XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: key.len(),
            })?;
        Ok(Self { cipher })
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        seal_with(&self.cipher, nonce, plaintext, aad)
    }

    fn open(
        &self,
        nonce: &[u8],
        ciphertext_and_tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        open_with(&self.cipher, nonce, ciphertext_and_tag, aad)
    }
}

/// Authentication tag (16 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag([u8; TAG_SIZE]);

impl Tag {
    /// Create a tag from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != TAG_SIZE {
            return None;
        }
        let mut bytes = [0u8; TAG_SIZE];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }
}

/// Output of one seal call: nonce, tag-stripped ciphertext and tag.
///
/// The three parts are produced together and must be consumed together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedBox {
    /// Nonce used for this encryption.
    pub nonce: Vec<u8>,
    /// Ciphertext without the trailing tag.
    pub ciphertext: Vec<u8>,
    /// Authentication tag split off the cipher output.
    pub tag: Tag,
}

impl SealedBox {
    /// Rebuild a sealed box from decoded token fields.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidTagLength`] if `tag` is not 16 bytes.
    pub fn from_parts(nonce: Vec<u8>, ciphertext: Vec<u8>, tag: &[u8]) -> Result<Self, CryptoError> {
        let tag = Tag::from_slice(tag).ok_or(CryptoError::InvalidTagLength {
            expected: TAG_SIZE,
            actual: tag.len(),
        })?;
        Ok(Self {
            nonce,
            ciphertext,
            tag,
        })
    }

    /// `ciphertext || tag`, the input expected by [`AeadCipher::open`].
    #[must_use]
    pub fn combined(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ciphertext.len() + TAG_SIZE);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(self.tag.as_bytes());
        out
    }
}

/// Seal under a caller-chosen nonce and split the tag off the output.
///
/// # Errors
///
/// Propagates [`AeadCipher::seal`] errors; returns
/// [`CryptoError::EncryptionFailed`] if the output is shorter than a tag.
pub fn seal_with_nonce<C: AeadCipher>(
    cipher: &C,
    nonce: Vec<u8>,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<SealedBox, CryptoError> {
    let mut ciphertext = cipher.seal(&nonce, plaintext, aad)?;
    if ciphertext.len() < C::TAG_SIZE {
        return Err(CryptoError::EncryptionFailed);
    }

    let tag = ciphertext.split_off(ciphertext.len() - C::TAG_SIZE);
    let tag = Tag::from_slice(&tag).ok_or(CryptoError::EncryptionFailed)?;

    Ok(SealedBox {
        nonce,
        ciphertext,
        tag,
    })
}

/// Seal under a fresh random nonce of `C::NONCE_SIZE` bytes.
///
/// # Errors
///
/// Returns [`CryptoError::RandomFailed`] if nonce generation fails, or any
/// error from [`seal_with_nonce`].
pub fn seal_detached<C: AeadCipher>(
    cipher: &C,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<SealedBox, CryptoError> {
    let nonce = random_vec(C::NONCE_SIZE)?;
    seal_with_nonce(cipher, nonce, plaintext, aad)
}

/// Reattach the tag and open a sealed box.
///
/// # Errors
///
/// Returns [`CryptoError::DecryptionFailed`] on authentication failure and
/// [`CryptoError::InvalidNonceLength`] for a malformed nonce.
pub fn open_detached<C: AeadCipher>(
    cipher: &C,
    sealed: &SealedBox,
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    cipher.open(&sealed.nonce, &sealed.combined(), aad)
}
