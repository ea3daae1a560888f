//! Criterion micro-benchmarks for bulk snapshot and indexing streams.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use meshdof_bench::{build_records, mixed_profile};
use meshdof_store::DofRecord;

fn bench_pack(c: &mut Criterion) {
    let records = build_records(10_000, &mixed_profile(), 2);
    let total: usize = records.iter().map(DofRecord::packed_indexing_size).sum();

    c.bench_function("pack_indexing_10k", |b| {
        let mut stream = Vec::with_capacity(total);
        b.iter(|| {
            stream.clear();
            for r in &records {
                r.pack_indexing(&mut stream);
            }
            black_box(stream.len())
        });
    });

    let mut stream = Vec::with_capacity(total);
    for r in &records {
        r.pack_indexing(&mut stream);
    }
    c.bench_function("unpack_indexing_10k", |b| {
        let mut out: Vec<DofRecord> = vec![DofRecord::new(); records.len()];
        b.iter(|| {
            let mut at = 0;
            for r in &mut out {
                at += r.unpack_indexing(&stream[at..]).unwrap();
            }
            black_box(at)
        });
    });

    c.bench_function("snapshot_replace_all_10k", |b| {
        let mut dst = DofRecord::new();
        b.iter(|| {
            for r in &records {
                dst.replace_all(&r.snapshot()).unwrap();
            }
            black_box(dst.n_systems())
        });
    });
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
