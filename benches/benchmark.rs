use criterion::{criterion_group, criterion_main, Criterion};
use kmer_table::{IndexConfig, KmerIndex};

use rand::{Rng, SeedableRng};
use std::hint::black_box;

const K: usize = 8;

/// Generate a reproducible 100-kbp pseudo-random DNA sequence.
fn make_seq() -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    const BASES: [u8; 4] = *b"ATGC";
    (0..100_000)
        .map(|_| BASES[rng.random_range(0..4)])
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let seq = make_seq();
    c.bench_function("build 8-mer index", |b| {
        b.iter(|| {
            let mut idx = KmerIndex::new(IndexConfig::new(K)).unwrap();
            black_box(idx.insert_sequence(&seq).unwrap());
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let seq = make_seq();
    let mut idx = KmerIndex::new(IndexConfig::new(K)).unwrap();
    idx.insert_sequence(&seq).unwrap();
    c.bench_function("query 8-mer index", |b| {
        b.iter(|| black_box(idx.query(black_box(&seq[..10_000])).unwrap()))
    });
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
