//! Criterion micro-benchmarks for ring end operations, middle insertion,
//! growth and iteration.

use std::collections::VecDeque;
use std::hint::black_box;

use coil_bench::{index_stream, wrapped_ring};
use coil_ring::{RingBuf, RingConfig};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

/// Push to both ends of a warm ring, then pop back to empty.
fn bench_end_ops(c: &mut Criterion) {
    let mut ring: RingBuf<u64> = RingBuf::with_capacity(4096).unwrap();
    c.bench_function("ring_end_ops_2k", |b| {
        b.iter(|| {
            for v in 0..1024u64 {
                ring.insert_back(v).unwrap();
                ring.insert_front(v).unwrap();
            }
            while let Some(v) = ring.pop_front() {
                black_box(v);
            }
        });
    });
}

/// Grow from the floor to 64K elements, wrapped at every doubling.
fn bench_growth(c: &mut Criterion) {
    c.bench_function("ring_grow_to_64k", |b| {
        b.iter(|| {
            let mut ring = RingBuf::new(RingConfig::new(16).with_min_capacity(1)).unwrap();
            for v in 0..65_536u64 {
                ring.insert_back(v).unwrap();
                if v % 3 == 0 {
                    ring.pop_front();
                    ring.insert_back(v).unwrap();
                }
            }
            black_box(ring.len());
        });
    });
}

/// Random-position insertion into a wrapped 10K ring.
fn bench_insert_at(c: &mut Criterion) {
    let indices = index_stream(42, 256, 10_000);
    c.bench_function("ring_insert_at_10k", |b| {
        b.iter_batched(
            || {
                let mut ring = wrapped_ring(10_000).unwrap();
                ring.reserve(10_256).unwrap();
                ring
            },
            |mut ring| {
                for &i in &indices {
                    let pos = ring.pos_of(i);
                    ring.insert_at(pos, 7).unwrap();
                }
                ring
            },
            BatchSize::SmallInput,
        );
    });

    // Same workload on the standard library deque, for scale.
    c.bench_function("vecdeque_insert_10k", |b| {
        b.iter_batched(
            || {
                let mut deque: VecDeque<u64> = (0..10_000).collect();
                deque.reserve(256);
                deque
            },
            |mut deque| {
                for &i in &indices {
                    deque.insert(i, 7);
                }
                deque
            },
            BatchSize::SmallInput,
        );
    });
}

/// Random-position removal from a wrapped 10K ring.
fn bench_remove_at(c: &mut Criterion) {
    let indices = index_stream(7, 256, 9_744);
    c.bench_function("ring_remove_at_10k", |b| {
        b.iter_batched(
            || wrapped_ring(10_000).unwrap(),
            |mut ring| {
                for &i in &indices {
                    let pos = ring.pos_of(i);
                    black_box(ring.release_at(pos));
                }
                ring
            },
            BatchSize::SmallInput,
        );
    });
}

/// Sum a wrapped 100K ring through the two-run iterator.
fn bench_iter(c: &mut Criterion) {
    let ring = wrapped_ring(100_000).unwrap();
    c.bench_function("ring_iter_sum_100k", |b| {
        b.iter(|| {
            let sum: u64 = ring.iter().sum();
            black_box(sum);
        });
    });
}

criterion_group!(
    benches,
    bench_end_ops,
    bench_growth,
    bench_insert_at,
    bench_remove_at,
    bench_iter
);
criterion_main!(benches);
