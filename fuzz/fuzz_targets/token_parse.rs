//! Fuzz target for token parsing
//!
//! Feeds arbitrary token text and keys to every engine. Parsing must never
//! panic, and freshly generated tokens must survive a round trip.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_core::{Algorithm, Claims, Engine, TokenCodec};

#[derive(Debug, Arbitrary)]
struct TokenInput {
    key: [u8; 32],
    token: String,
    claim: String,
    short_key: Vec<u8>,
}

fuzz_target!(|input: TokenInput| {
    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);

        // Arbitrary text: must fail cleanly
        let _ = engine.parse(&input.token, &input.key);
        let _ = engine.parse(&input.token, &input.short_key);

        // Real token: must round-trip
        let mut claims = Claims::new();
        claims.insert("sub".into(), serde_json::Value::String(input.claim.clone()));
        if let Ok(token) = engine.generate(&claims, &input.key) {
            assert_eq!(engine.parse(&token, &input.key).ok(), Some(claims));
        }
    }
});
