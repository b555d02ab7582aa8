use criterion::{black_box, criterion_group, criterion_main, Criterion};
use credence_types::{CertificatePayload, Timestamp};

fn ed25519_sign_bench(c: &mut Criterion) {
    let kp = credence_crypto::generate_keypair();
    let msg = [42u8; 128];

    c.bench_function("ed25519_sign_128B", |b| {
        b.iter(|| credence_crypto::sign_message(black_box(&msg), &kp.private))
    });
}

fn ed25519_verify_bench(c: &mut Criterion) {
    let kp = credence_crypto::generate_keypair();
    let msg = [42u8; 128];
    let sig = credence_crypto::sign_message(&msg, &kp.private);

    c.bench_function("ed25519_verify_128B", |b| {
        b.iter(|| credence_crypto::verify_signature(black_box(&msg), &sig, &kp.public))
    });
}

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| credence_crypto::blake2b_256(black_box(&data)))
    });
}

fn blake2b_256_1kb_bench(c: &mut Criterion) {
    let data = vec![0xCDu8; 1024];

    c.bench_function("blake2b_256_1KB", |b| {
        b.iter(|| credence_crypto::blake2b_256(black_box(&data)))
    });
}

fn cache_key_hash_bench(c: &mut Criterion) {
    // Identity fields the orchestrator hashes into a cache key.
    let parts: Vec<&[u8]> = vec![
        b"tundra electrical ltd",
        b"\x1f",
        b"123456789RC0001",
        b"\x1f",
        b"ON",
        b"\x1f",
        &[4, 0, 0, 0, 0, 0, 0, 0],
    ];

    c.bench_function("blake2b_256_multi_cache_key", |b| {
        b.iter(|| credence_crypto::blake2b_256_multi(black_box(&parts)))
    });
}

fn certificate_sign_bench(c: &mut Criterion) {
    let kp = credence_crypto::generate_keypair();
    let digest = "ab".repeat(32);
    let payload = CertificatePayload {
        id: "vr-1734e2a90b44",
        issued_at: Timestamp::new(1_700_000_000),
        expires_at: Timestamp::new(1_731_536_000),
        confidence: 0.97,
        details_digest: &digest,
    };

    c.bench_function("certificate_sign", |b| {
        b.iter(|| credence_crypto::sign_certificate_payload(black_box(&payload), &kp.private))
    });
}

fn keypair_generation_bench(c: &mut Criterion) {
    c.bench_function("keypair_generate", |b| {
        b.iter(credence_crypto::generate_keypair)
    });
}

criterion_group!(
    benches,
    ed25519_sign_bench,
    ed25519_verify_bench,
    blake2b_256_bench,
    blake2b_256_1kb_bench,
    cache_key_hash_bench,
    certificate_sign_bench,
    keypair_generation_bench,
);
criterion_main!(benches);
