//! Example: Replicating Factors on a Synthetic Panel
//!
//! Simulates a universe whose returns load on latent value and momentum
//! premia, publishes noisy "benchmark" versions of those premia, then runs
//! the full build and validation pipeline under all three weighting schemes.
//!
//! Run with: `cargo run --example synthetic_replication --features full`

use factorcheck::{
    model::bucket_composition,
    primitives::{
        Characteristic, CharacteristicPanel, EntityId, FactorReturnSeries, Observation, Period,
        StandardFactor, Weighting, offset_month_ends,
    },
    utils::InMemoryBenchmarks,
    validate::{ReplicationConfig, run_replication},
};
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};

/// Months of simulated history.
const N_MONTHS: i32 = 120;

/// Firms in the simulated universe.
const N_FIRMS: u64 = 400;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let start = Period::from_ymd_opt(2010, 1, 31).ok_or("invalid start date")?;
    let month = |t: i32| offset_month_ends(start, t).ok_or("date out of range");

    // Latent premia realized each month
    let premium = Normal::new(0.004, 0.03)?;
    let value: Vec<f64> = (0..N_MONTHS).map(|_| premium.sample(&mut rng)).collect();
    let momentum: Vec<f64> = (0..N_MONTHS).map(|_| premium.sample(&mut rng)).collect();

    // Firm loadings are persistent; characteristics are noisy signals of them
    let loading = Normal::new(0.0, 1.0)?;
    let firms: Vec<(f64, f64, f64)> = (0..N_FIRMS)
        .map(|_| {
            let size = LogNormal::new(6.0, 1.5).map(|d| d.sample(&mut rng)).unwrap_or(1.0);
            (loading.sample(&mut rng), loading.sample(&mut rng), size)
        })
        .collect();

    let noise = Normal::new(0.0, 0.05)?;
    let signal = Normal::new(0.0, 0.2)?;
    let mut rows = Vec::with_capacity(N_MONTHS as usize * N_FIRMS as usize);
    for t in 0..N_MONTHS {
        let period = month(t)?;
        for (i, &(b_value, b_mom, size)) in firms.iter().enumerate() {
            let mut obs = Observation::new(EntityId::new(i as u64))
                .with_characteristic(
                    Characteristic::BookToMarket,
                    b_value + signal.sample(&mut rng),
                )
                .with_characteristic(Characteristic::Momentum12m, b_mom + signal.sample(&mut rng))
                .with_market_weight(size)
                .with_return(
                    b_value * value[t as usize]
                        + b_mom * momentum[t as usize]
                        + noise.sample(&mut rng),
                );
            // A few firms drop their characteristic each month
            if rng.gen_bool(0.02) {
                obs.characteristics.set(Characteristic::Momentum12m, None);
            }
            rows.push((period, obs));
        }
    }
    let panel = CharacteristicPanel::from_observations(
        rows,
        [Characteristic::BookToMarket, Characteristic::Momentum12m],
    )?;
    println!(
        "Simulated panel: {} months, {} observations",
        panel.len(),
        panel.n_observations()
    );

    // Published benchmarks are the premia plus tracking noise, dated at realization
    let tracking = Normal::new(0.0, 0.004)?;
    let mut benchmarks = InMemoryBenchmarks::new();
    for weighting in Weighting::ALL {
        let premia = [(StandardFactor::Value, &value), (StandardFactor::Momentum, &momentum)];
        for (factor, premia) in premia {
            let points = (1..N_MONTHS)
                .map(|t| Ok((month(t)?, premia[t as usize] + tracking.sample(&mut rng))))
                .collect::<Result<Vec<_>, &str>>()?;
            let name = factor.definition().benchmark;
            benchmarks.insert(weighting, FactorReturnSeries::new(name, points)?);
        }
    }

    let config = ReplicationConfig {
        factors: vec![StandardFactor::Value.definition(), StandardFactor::Momentum.definition()],
        ..ReplicationConfig::default()
    };
    let report = run_replication(&panel, &benchmarks, &config);
    report.print_summary();

    // Composition of the momentum sort in the final month
    let composition = bucket_composition(&panel, Characteristic::Momentum12m, &config.build)?;
    println!("\nMomentum buckets in {}:", month(N_MONTHS - 1)?);
    let last = panel.periods().last().unwrap_or(start);
    for row in composition.iter().filter(|r| r.period == last) {
        println!(
            "  bucket {}: {:>4} firms, mean weight {:>10.1}, mean signal {:>+.3}",
            row.bucket, row.n_entities, row.mean_market_weight, row.mean_characteristic
        );
    }

    Ok(())
}
