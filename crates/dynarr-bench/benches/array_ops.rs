//! Criterion micro-benchmarks for append growth and element removal.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dynarr::{ByteArray, DynArray};
use dynarr_bench::{filled_array, removal_indices};

const LEN: usize = 10_000;

/// Benchmark: Append 10K `i32` values one at a time from an empty array.
fn bench_append_10k(c: &mut Criterion) {
    c.bench_function("append_10k", |b| {
        b.iter(|| {
            let mut array = DynArray::<i32>::new(false, false).unwrap();
            for i in 0..LEN as i32 {
                array.push(i).unwrap();
            }
            black_box(array.len());
        });
    });
}

/// Benchmark: Same as above on a zero-terminated, clear-on-alloc array.
fn bench_append_10k_terminated(c: &mut Criterion) {
    c.bench_function("append_10k_terminated", |b| {
        b.iter(|| {
            let mut array = DynArray::<i32>::new(true, true).unwrap();
            for i in 0..LEN as i32 {
                array.push(i).unwrap();
            }
            black_box(array.len());
        });
    });
}

/// Benchmark: One bulk append of 10K 24-byte records.
fn bench_append_many_records(c: &mut Criterion) {
    let records = vec![0xa5u8; LEN * 24];
    c.bench_function("append_many_24b_10k", |b| {
        b.iter(|| {
            let mut array = ByteArray::new(24, false, false).unwrap();
            array.append_many(&records, LEN).unwrap();
            black_box(array.len());
        });
    });
}

/// Benchmark: Order-preserving removal of 1K random elements from 10K.
fn bench_remove_index(c: &mut Criterion) {
    let indices = removal_indices(LEN, 1_000, 42);
    c.bench_function("remove_index_1k_of_10k", |b| {
        b.iter_batched(
            || filled_array(LEN, false).unwrap(),
            |mut array| {
                for &idx in &indices {
                    black_box(array.remove_index(idx).unwrap());
                }
                array
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: Swap-with-last removal of the same 1K positions.
fn bench_remove_index_fast(c: &mut Criterion) {
    let indices = removal_indices(LEN, 1_000, 42);
    c.bench_function("remove_index_fast_1k_of_10k", |b| {
        b.iter_batched(
            || filled_array(LEN, false).unwrap(),
            |mut array| {
                for &idx in &indices {
                    black_box(array.remove_index_fast(idx).unwrap());
                }
                array
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_append_10k,
    bench_append_10k_terminated,
    bench_append_many_records,
    bench_remove_index,
    bench_remove_index_fast
);
criterion_main!(benches);
