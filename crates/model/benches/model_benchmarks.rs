//! Benchmarks for factorcheck-model sorting and factor construction.
#![allow(missing_docs)]

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use factorcheck_model::{FactorBuilder, PortfolioSpec, sort};
use factorcheck_primitives::{
    Characteristic, CharacteristicPanel, EntityId, Observation, Period, StandardFactor, Weighting,
    offset_month_ends,
};
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};

const BM: Characteristic = Characteristic::BookToMarket;

fn random_panel(n_periods: usize, n_entities: u64) -> CharacteristicPanel {
    let mut rng = rand::thread_rng();
    let caps = LogNormal::new(7.0, 1.5).unwrap();
    let rets = Normal::new(0.01, 0.08).unwrap();
    let start = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap();

    let mut rows = Vec::with_capacity(n_periods * n_entities as usize);
    for t in 0..n_periods {
        let period: Period = offset_month_ends(start, t as i32).unwrap();
        for i in 0..n_entities {
            // Roughly 5% of characteristics missing
            let mut obs = Observation::new(EntityId::new(i))
                .with_market_weight(caps.sample(&mut rng))
                .with_return(rets.sample(&mut rng));
            if rng.gen_bool(0.95) {
                obs = obs.with_characteristic(BM, rng.r#gen::<f64>() * 2.0);
            }
            rows.push((period, obs));
        }
    }
    CharacteristicPanel::from_observations(rows, [BM]).unwrap()
}

fn bench_sort_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_single");
    group.sample_size(50);

    for n_entities in [100, 1000, 3000, 5000] {
        let panel = random_panel(1, n_entities);
        let section = &panel.sections()[0];

        group.throughput(Throughput::Elements(n_entities));
        group.bench_with_input(BenchmarkId::new("n_entities", n_entities), section, |b, section| {
            b.iter(|| sort(black_box(section), BM, 5).unwrap());
        });
    }

    group.finish();
}

fn bench_build_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_scaling");
    group.sample_size(20);

    let builder = FactorBuilder::new();
    let spec =
        PortfolioSpec::from_definition(&StandardFactor::Value.definition(), 5, Weighting::Value);

    // Scale number of periods at a realistic universe size
    for n_periods in [12, 60, 240] {
        let panel = random_panel(n_periods, 1000);
        group.throughput(Throughput::Elements(n_periods as u64));
        group.bench_with_input(BenchmarkId::new("n_periods", n_periods), &panel, |b, panel| {
            b.iter(|| builder.build(black_box(panel), "value_vw", &spec).unwrap());
        });
    }

    group.finish();
}

fn bench_weighting_schemes(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighting_schemes");
    group.sample_size(20);

    let builder = FactorBuilder::new();
    let panel = random_panel(60, 2000);
    let definition = StandardFactor::Value.definition();

    for weighting in Weighting::ALL {
        group.bench_function(weighting.code(), |b| {
            b.iter(|| builder.build_factor(black_box(&panel), &definition, weighting).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sort_single, bench_build_scaling, bench_weighting_schemes);
criterion_main!(benches);
