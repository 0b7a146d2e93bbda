//! Fuzz target for header and segment decoding
//!
//! Tests that arbitrary segments don't cause panics in the base64url codec
//! or the compact header decoder.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_core::Header;
use tessera_crypto::encoding;

fuzz_target!(|data: &[u8]| {
    if let Ok(segment) = std::str::from_utf8(data) {
        if let Ok(bytes) = encoding::decode(segment) {
            // Canonical decoding re-encodes to the same text
            assert_eq!(encoding::encode(&bytes), segment);
        }

        if let Ok(header) = Header::decode(segment) {
            let _ = header.nonce();
            let _ = header.tag();
        }
    }

    // Raw JSON bytes wrapped as a segment
    let _ = Header::decode(&encoding::encode(data));
});
