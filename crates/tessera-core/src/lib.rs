//! # Tessera Core
//!
//! Encrypted claims tokens with pluggable engines.
//!
//! This crate provides:
//! - AES-256-GCM key-wrap tokens in JWE compact form (5 segments)
//! - ChaCha20-Poly1305 and XChaCha20-Poly1305 tokens signed with
//!   HMAC-SHA256 (3 segments)
//! - An engine selector keyed by algorithm identifier
//! - Hex keys, TOML/environment configuration and a key-bound service
//!
//! ## Token Layouts
//!
//! ```text
//! AES-GCM-256   header . encrypted_key . iv . ciphertext . tag
//! ChaCha20      header . ciphertext . signature
//! XChaCha20     header . ciphertext . signature
//! ```
//!
//! Every segment is unpadded base64url. The compact formats carry the
//! nonce and AEAD tag in the header and sign `header.ciphertext`.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tessera_core::{Claims, TokenService};
//!
//! let service = TokenService::from_hex(
//!     "XChaCha20",
//!     "bdacaf398071931518f73917cb0c6f04b3a0ab45ee9cbedc258047a8c149a3e1",
//! )?;
//!
//! let mut claims = Claims::new();
//! claims.insert("exp".into(), json!(99_999_999_999_u64));
//!
//! let token = service.generate(&claims)?;
//! assert_eq!(service.parse(&token)?, claims);
//! # Ok::<(), tessera_core::TokenError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod claims;
pub mod config;
pub mod engine;
pub mod error;
pub mod header;
pub mod keys;
pub mod service;

pub use algorithm::Algorithm;
pub use claims::Claims;
pub use config::TokenConfig;
pub use engine::{ChaCha20Engine, DirectEngine, Engine, KeyWrapEngine, TokenCodec, XChaCha20Engine};
pub use error::{Result, TokenError};
pub use header::Header;
pub use keys::SecretKey;
pub use service::TokenService;
