//! Benchmarks for factorcheck-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use factorcheck_math::{
    cap_weights, normalize_weights, pearson_correlation, quantile, rank_buckets,
};
use ndarray::Array1;
use rand::Rng;

fn random_values(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.r#gen::<f64>() * 0.1 - 0.05).collect()
}

fn bench_rank_buckets(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_buckets");

    for size in [100, 1000, 10000, 100000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let values = random_values(size);
            b.iter(|| rank_buckets(black_box(&values), black_box(5)).unwrap());
        });
    }

    group.finish();
}

fn bench_capped_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("capped_weights");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let caps: Vec<f64> = random_values(size).iter().map(|v| (v + 0.06) * 1e4).collect();
            let raw = Array1::from_vec(caps.clone());
            b.iter(|| {
                let cap = quantile(black_box(&caps), 0.8).unwrap();
                normalize_weights(&cap_weights(black_box(&raw), cap))
            });
        });
    }

    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pearson_correlation");

    for size in [60, 240, 720] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let x = random_values(size);
            let y = random_values(size);
            b.iter(|| pearson_correlation(black_box(&x), black_box(&y)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank_buckets, bench_capped_weights, bench_correlation);
criterion_main!(benches);
