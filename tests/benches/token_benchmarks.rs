//! Performance benchmarks for token generation and parsing.
//!
//! Run with: `cargo bench -p tessera-integration-tests`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tessera_core::{Algorithm, Engine, TokenCodec};
use tessera_crypto::mac;
use tessera_integration_tests::{expiry_claims, sized_claims, vector_key};

const PAYLOAD_SIZES: [usize; 4] = [16, 256, 4096, 65536];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_generate");
    let key = vector_key();

    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        for size in PAYLOAD_SIZES {
            let claims = sized_claims(size);

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new(algorithm.as_str(), size), &size, |b, _| {
                b.iter(|| engine.generate(black_box(&claims), black_box(&key)))
            });
        }
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_parse");
    let key = vector_key();

    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        for size in PAYLOAD_SIZES {
            let token = engine.generate(&sized_claims(size), &key).unwrap();

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new(algorithm.as_str(), size), &size, |b, _| {
                b.iter(|| engine.parse(black_box(&token), black_box(&key)))
            });
        }
    }

    group.finish();
}

fn bench_reject(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_reject");
    let key = vector_key();
    let wrong_key = [0u8; 32];

    for algorithm in Algorithm::ALL {
        let engine = Engine::from_algorithm(algorithm);
        let token = engine.generate(&expiry_claims(), &key).unwrap();

        group.bench_function(algorithm.as_str(), |b| {
            b.iter(|| engine.verify(black_box(&token), black_box(&wrong_key)))
        });
    }

    group.finish();
}

fn bench_signature(c: &mut Criterion) {
    let key = vector_key();
    let header = "eyJhbGciOiJkaXIiLCJlbmMiOiJDMjBQIn0";
    let ciphertext = "A".repeat(1024);

    c.bench_function("hmac_sha256_segments", |b| {
        b.iter(|| mac::signature(black_box(&key), black_box(header), black_box(&ciphertext)))
    });
}

criterion_group!(token_benches, bench_generate, bench_parse, bench_reject);
criterion_group!(signature_benches, bench_signature);

criterion_main!(token_benches, signature_benches);
