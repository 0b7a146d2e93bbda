//! End-to-end token flows across engines, services and configuration.

use std::io::Write;

use serde_json::json;
use tessera_core::{
    Algorithm, Claims, Engine, SecretKey, TokenCodec, TokenConfig, TokenError, TokenService,
};
use tessera_crypto::{CryptoError, encoding, mac};
use tessera_integration_tests::{
    VECTOR_KEY_HEX, claims_from, expiry_claims, init_tracing, rich_claims, sized_claims,
    vector_key,
};

#[test]
fn test_round_trip_all_algorithms() {
    init_tracing();
    let key = vector_key();

    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        let token = engine.generate(&rich_claims(), &key).unwrap();

        assert_eq!(token.split('.').count(), algorithm.segment_count());
        assert!(token.is_ascii());
        assert!(!token.contains('='));
        assert_eq!(engine.parse(&token, &key).unwrap(), rich_claims());
    }
}

#[test]
fn test_large_payloads() {
    let key = vector_key();
    let claims = sized_claims(64 * 1024);

    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        let token = engine.generate(&claims, &key).unwrap();
        assert_eq!(engine.parse(&token, &key).unwrap(), claims);
    }
}

#[test]
fn test_empty_claims() {
    let key = vector_key();
    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        let token = engine.generate(&Claims::new(), &key).unwrap();
        assert!(engine.parse(&token, &key).unwrap().is_empty());
    }
}

#[test]
fn test_unknown_algorithm() {
    for identifier in ["", "aes-gcm-256", "A256GCM", "ChaCha20-Poly1305", "xchacha20"] {
        assert_eq!(
            Engine::new(identifier),
            Err(TokenError::UnknownAlgorithm(identifier.to_string()))
        );
    }
}

#[test]
fn test_truncated_tokens_are_rejected() {
    let key = vector_key();

    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        let token = engine.generate(&rich_claims(), &key).unwrap();
        let last_dot = token.rfind('.').unwrap();

        assert!(matches!(
            engine.parse(&token[..last_dot], &key),
            Err(TokenError::Format(_))
        ));
        assert!(!engine.verify(&token[..token.len() - 1], &key));
    }
}

#[test]
fn test_extra_segment_is_rejected() {
    let key = vector_key();
    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        let token = engine.generate(&rich_claims(), &key).unwrap();
        assert!(matches!(
            engine.parse(&format!("{token}.AAAA"), &key),
            Err(TokenError::Format(_))
        ));
    }
}

#[test]
fn test_signed_forgery_with_attacker_key_rejected() {
    // A token built by someone holding a different key, signed correctly
    // for that key, must not parse under ours.
    let ours = vector_key();
    let theirs = [0x77u8; 32];

    let engine = Engine::from_algorithm(Algorithm::XChaCha20);
    let token = engine.generate(&rich_claims(), &theirs).unwrap();

    assert_eq!(engine.parse(&token, &ours), Err(TokenError::Signature));
}

#[test]
fn test_resigned_ciphertext_swap_fails_decryption() {
    // With the key, a re-signed token whose ciphertext came from another
    // token still fails the AEAD tag check.
    let key = vector_key();
    let engine = Engine::from_algorithm(Algorithm::ChaCha20);

    let a = engine.generate(&claims_from(json!({ "sub": "alice" })), &key).unwrap();
    let b = engine.generate(&claims_from(json!({ "sub": "bobby" })), &key).unwrap();
    let a: Vec<&str> = a.split('.').collect();
    let b: Vec<&str> = b.split('.').collect();

    let signature = mac::signature(&key, a[0], b[1]).unwrap();
    let spliced = format!("{}.{}.{signature}", a[0], b[1]);

    assert_eq!(
        engine.parse(&spliced, &key),
        Err(TokenError::Crypto(CryptoError::DecryptionFailed))
    );
}

#[test]
fn test_key_wrap_header_swap_fails() {
    let key = vector_key();
    let engine = Engine::from_algorithm(Algorithm::AesGcm256);

    let a = engine.generate(&rich_claims(), &key).unwrap();
    let b = engine.generate(&rich_claims(), &key).unwrap();
    let a: Vec<&str> = a.split('.').collect();
    let b: Vec<&str> = b.split('.').collect();

    // Header from one token, everything else from the other.
    let mixed = [b[0], a[1], a[2], a[3], a[4]].join(".");
    assert_eq!(
        engine.parse(&mixed, &key),
        Err(TokenError::Crypto(CryptoError::DecryptionFailed))
    );
}

#[test]
fn test_wrong_key_length_reported() {
    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        assert!(matches!(
            engine.generate(&rich_claims(), &[0u8; 16]),
            Err(TokenError::Crypto(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 16
            }))
        ));
    }
}

#[test]
fn test_service_from_config_file() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "algorithm = \"ChaCha20\"").unwrap();
    writeln!(file, "key = \"{VECTOR_KEY_HEX}\"").unwrap();

    let config = TokenConfig::load(file.path()).unwrap();
    config.validate().unwrap();

    let service = TokenService::from_config(&config).unwrap();
    assert_eq!(service.algorithm(), Algorithm::ChaCha20);

    let token = service.generate(&rich_claims()).unwrap();
    let direct = Engine::from_algorithm(Algorithm::ChaCha20);
    assert_eq!(direct.parse(&token, &vector_key()).unwrap(), rich_claims());
}

#[test]
fn test_service_and_engine_interoperate() {
    let key = SecretKey::from_hex(VECTOR_KEY_HEX).unwrap();
    let service = TokenService::new(Engine::from_algorithm(Algorithm::AesGcm256), key.clone());

    let token = Engine::from_algorithm(Algorithm::AesGcm256)
        .generate(&rich_claims(), key.as_ref())
        .unwrap();
    assert!(service.verify(&token));
}

#[test]
fn test_concurrent_generate_and_parse() {
    let key = vector_key();

    std::thread::scope(|scope| {
        for algorithm in Algorithm::ALL {
            for worker in 0..3u64 {
                scope.spawn(move || {
                    let engine = Engine::from_algorithm(algorithm);
                    let mut seen = std::collections::HashSet::new();
                    for i in 0..20u64 {
                        let claims = claims_from(json!({ "worker": worker, "i": i }));
                        let token = engine.generate(&claims, &key).unwrap();
                        assert!(seen.insert(token.clone()));
                        assert_eq!(engine.parse(&token, &key).unwrap(), claims);
                    }
                });
            }
        }
    });
}

#[test]
fn test_compact_header_is_plain_json() {
    let key = vector_key();
    let token = Engine::from_algorithm(Algorithm::XChaCha20)
        .generate(&rich_claims(), &key)
        .unwrap();
    let header = encoding::decode(token.split('.').next().unwrap()).unwrap();
    let header: serde_json::Value = serde_json::from_slice(&header).unwrap();

    assert_eq!(header["alg"], "dir");
    assert_eq!(header["enc"], "XC20P");
    assert_eq!(
        encoding::decode(header["iv"].as_str().unwrap()).unwrap().len(),
        24
    );
}

#[test]
fn test_chacha20_expiry_scenario() {
    let key = vector_key();
    let engine = Engine::new("ChaCha20").unwrap();
    let token = engine.generate(&expiry_claims(), &key).unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);

    let header: serde_json::Value =
        serde_json::from_slice(&encoding::decode(segments[0]).unwrap()).unwrap();
    assert_eq!(header["alg"], "dir");
    assert_eq!(header["enc"], "C20P");
    assert_eq!(encoding::decode(header["iv"].as_str().unwrap()).unwrap().len(), 12);
    assert_eq!(encoding::decode(header["tag"].as_str().unwrap()).unwrap().len(), 16);

    assert_eq!(engine.parse(&token, &key).unwrap(), expiry_claims());
}
