//! Comparative benchmarks for `UnrolledList` against `Vec`.
//!
//! Runs each workload at several roll sizes so the trade-off between middle
//! mutation and random access shows up side by side.

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use unrolled::UnrolledList;

const ROLL_SIZES: [usize; 3] = [8, 16, 64];

/// Deterministic insertion positions for a list growing to `count` elements.
fn insert_positions(count: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|len| rng.gen_range(0..=len)).collect()
}

fn filled(roll_size: usize, count: usize) -> UnrolledList<u64> {
    let mut list = UnrolledList::with_roll_size(roll_size).unwrap();
    list.extend(0..count as u64);
    list
}

// =============================================================================
// Append
// =============================================================================

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for size in [1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        for roll_size in ROLL_SIZES {
            group.bench_with_input(
                BenchmarkId::new(format!("Unrolled/{}", roll_size), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        let mut list = UnrolledList::with_roll_size(roll_size).unwrap();
                        for i in 0..size as u64 {
                            list.push(i);
                        }
                        black_box(list.len())
                    });
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..size as u64 {
                    vec.push(i);
                }
                black_box(vec.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Random Inserts
// =============================================================================

fn bench_random_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_inserts");

    for size in [1_000, 10_000, 50_000] {
        let positions = insert_positions(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        for roll_size in ROLL_SIZES {
            group.bench_with_input(
                BenchmarkId::new(format!("Unrolled/{}", roll_size), size),
                &positions,
                |b, positions| {
                    b.iter(|| {
                        let mut list = UnrolledList::with_roll_size(roll_size).unwrap();
                        for (i, &pos) in positions.iter().enumerate() {
                            list.insert(pos, i as u64).unwrap();
                        }
                        black_box(list.len())
                    });
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("Vec", size), &positions, |b, positions| {
            b.iter(|| {
                let mut vec = Vec::new();
                for (i, &pos) in positions.iter().enumerate() {
                    vec.insert(pos, i as u64);
                }
                black_box(vec.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Random Removes
// =============================================================================

fn bench_random_removes(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_removes");

    for size in [1_000, 10_000] {
        let mut rng = StdRng::seed_from_u64(7);
        let positions: Vec<usize> = (1..=size).rev().map(|len| rng.gen_range(0..len)).collect();
        group.throughput(Throughput::Elements(size as u64));

        for roll_size in ROLL_SIZES {
            group.bench_with_input(
                BenchmarkId::new(format!("Unrolled/{}", roll_size), size),
                &positions,
                |b, positions| {
                    b.iter_batched(
                        || filled(roll_size, size),
                        |mut list| {
                            for &pos in positions {
                                black_box(list.remove(pos).unwrap());
                            }
                            list
                        },
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("Vec", size), &positions, |b, positions| {
            b.iter_batched(
                || (0..size as u64).collect::<Vec<_>>(),
                |mut vec| {
                    for &pos in positions {
                        black_box(vec.remove(pos));
                    }
                    vec
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Reads
// =============================================================================

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");
    let size = 10_000;
    let mut rng = StdRng::seed_from_u64(3);
    let lookups: Vec<usize> = (0..1_000).map(|_| rng.gen_range(0..size)).collect();

    for roll_size in ROLL_SIZES {
        let list = filled(roll_size, size);
        group.bench_with_input(
            BenchmarkId::new("random_get", roll_size),
            &lookups,
            |b, lookups| {
                b.iter(|| {
                    let mut sum = 0u64;
                    for &index in lookups {
                        sum += list[index];
                    }
                    black_box(sum)
                });
            },
        );
        group.bench_function(BenchmarkId::new("iterate", roll_size), |b| {
            b.iter(|| black_box(list.iter().sum::<u64>()));
        });
    }

    group.finish();
}

// =============================================================================
// Cursor Editing
// =============================================================================

fn bench_cursor_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_filter");
    let size = 10_000;

    for roll_size in ROLL_SIZES {
        group.bench_function(BenchmarkId::new("Unrolled", roll_size), |b| {
            b.iter_batched(
                || filled(roll_size, size),
                |mut list| {
                    let mut cursor = list.cursor();
                    while cursor.has_next() {
                        if cursor.next().unwrap() % 3 == 0 {
                            cursor.remove().unwrap();
                        }
                    }
                    list
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_push,
    bench_random_inserts,
    bench_random_removes,
    bench_reads,
    bench_cursor_filter,
);

criterion_main!(benches);
