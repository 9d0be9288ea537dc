use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use pinblock_core::{decrypt_pin_block, encrypt_pin_block, expand, Format};

const PAN: &str = "5364146259585156";

fn bench_key_expansion(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);

    let mut group = c.benchmark_group("key");
    for len in [8usize, 16, 24] {
        let mut key = vec![0u8; len];
        rng.fill_bytes(&mut key);
        group.bench_function(format!("expand_{}", len), |b| {
            b.iter(|| expand(&key));
        });
    }
    group.finish();
}

fn bench_pin_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let key_hex = hex::encode(key);
    let block = match encrypt_pin_block(Format::Iso0, "5810", PAN, &key_hex) {
        Ok(block) => block,
        Err(err) => panic!("bench setup failed: {}", err),
    };

    let mut group = c.benchmark_group("pin_block");
    group.bench_function("encrypt_iso0", |b| {
        b.iter(|| encrypt_pin_block(Format::Iso0, "5810", PAN, &key_hex));
    });
    group.bench_function("decrypt_iso0", |b| {
        b.iter(|| decrypt_pin_block(Format::Iso0, PAN, &key_hex, &block));
    });
    group.finish();
}

criterion_group!(benches, bench_key_expansion, bench_pin_block);
criterion_main!(benches);
