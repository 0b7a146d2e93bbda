//! # Tessera Crypto
//!
//! Cryptographic primitives for Tessera tokens.
//!
//! This crate provides:
//! - AEAD strategies behind a single [`aead::AeadCipher`] interface
//! - Detached sealing (nonce, ciphertext and tag kept apart) for token layouts
//! - Base64url (unpadded) segment codec
//! - HMAC-SHA256 signatures over dot-joined encoded segments
//! - Constant-time comparison and OS-backed randomness
//!
//! ## Cipher Suite
//!
//! | Strategy | Algorithm | Nonce | Tag |
//! |----------|-----------|-------|-----|
//! | [`aead::Aes256GcmCipher`] | AES-256-GCM | 96-bit | 128-bit |
//! | [`aead::ChaCha20Cipher`] | ChaCha20-Poly1305 | 96-bit | 128-bit |
//! | [`aead::XChaCha20Cipher`] | XChaCha20-Poly1305 | 192-bit | 128-bit |
//!
//! All three strategies take a 256-bit key.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aead;
pub mod constant_time;
pub mod encoding;
pub mod error;
pub mod mac;
pub mod random;

pub use error::CryptoError;

/// Symmetric key size shared by every strategy (32 bytes).
pub const KEY_SIZE: usize = 32;

/// AEAD authentication tag size (16 bytes).
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM nonce size.
pub const GCM_NONCE_SIZE: usize = 12;

/// ChaCha20-Poly1305 nonce size.
pub const CHACHA_NONCE_SIZE: usize = 12;

/// XChaCha20-Poly1305 nonce size.
pub const XCHACHA_NONCE_SIZE: usize = 24;

/// HMAC-SHA256 output size.
pub const MAC_SIZE: usize = 32;
