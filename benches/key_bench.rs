// Criterion benchmarks for order key generation
//
// Workloads:
// - append: chaining keys onto the end of a list
// - same_spot: inserting right after the same item over and over
// - random_moves: moving random items in a backlog
// - bulk: generating N keys in one gap

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use ordkey::Backlog;
use ordkey::generate_key_between;
use ordkey::generate_n_keys_between;

// =============================================================================
// Single Key Benchmarks
// =============================================================================

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut last = generate_key_between(None, None).unwrap();
                for _ in 1..size {
                    last = generate_key_between(Some(last.as_str()), None).unwrap();
                }
                black_box(last)
            });
        });
    }

    group.finish();
}

fn bench_same_spot(c: &mut Criterion) {
    let mut group = c.benchmark_group("same_spot");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let lower = "a0".to_string();
                let mut upper = "a1".to_string();
                for _ in 0..size {
                    upper = generate_key_between(Some(lower.as_str()), Some(upper.as_str())).unwrap();
                }
                black_box(upper.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Backlog Benchmarks
// =============================================================================

fn bench_random_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_moves");

    for size in [100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                let mut backlog = Backlog::new();
                backlog.extend_at(0, 0..size as u64).unwrap();
                for _ in 0..size {
                    let id = rng.gen_range(0..size as u64);
                    let to = rng.gen_range(0..size);
                    backlog.move_to(&id, to).unwrap();
                }
                black_box(backlog.max_key_len())
            });
        });
    }

    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("closed", size), &size, |b, &size| {
            b.iter(|| black_box(generate_n_keys_between(Some("a0"), Some("a1"), size).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("open", size), &size, |b, &size| {
            b.iter(|| black_box(generate_n_keys_between(None, None, size).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_append,
    bench_same_spot,
    bench_random_moves,
    bench_bulk,
);

criterion_main!(benches);
