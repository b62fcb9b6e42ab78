//! Factor replication CLI tool.
//!
//! Builds the configured factors from a firm-month characteristic file and
//! validates each against published benchmark series.
//!
//! Usage: `cargo run --features cli --bin replicate -- RUN.json [--diagnostics COLUMN]`
//!
//! The run file names the panel CSV, one long-format benchmark CSV per
//! weighting scheme and, optionally, the replication settings:
//!
//! ```json
//! {
//!   "panel": "data/char_usa.csv",
//!   "benchmarks": [
//!     { "weighting": "ew", "path": "data/factors_ew.csv" },
//!     { "weighting": "vw_cap", "path": "data/factors_vw_cap.csv" }
//!   ],
//!   "replication": {
//!     "weightings": ["ew", "vw_cap"],
//!     "build": { "breakpoint_weight_quantile": 0.2 }
//!   }
//! }
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use factorcheck::{
    model::{BuildConfig, bucket_composition},
    primitives::{Characteristic, CharacteristicPanel, Weighting},
    traits::PanelProvider,
    utils::{BenchmarkSchema, FramePanelProvider, InMemoryBenchmarks, PanelSchema},
    validate::{ReplicationConfig, run_replication},
};
use polars::prelude::*;
use serde::Deserialize;
use tracing::info;

/// One benchmark file and the scheme it was published for.
#[derive(Debug, Deserialize)]
struct BenchmarkFile {
    weighting: Weighting,
    path: PathBuf,
}

/// Contents of the run file.
#[derive(Debug, Deserialize)]
struct RunFile {
    panel: PathBuf,
    #[serde(default)]
    panel_schema: PanelSchema,
    benchmarks: Vec<BenchmarkFile>,
    #[serde(default)]
    benchmark_schema: BenchmarkSchema,
    #[serde(default)]
    replication: ReplicationConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: replicate RUN.json [--diagnostics COLUMN]");
        eprintln!("Example: replicate run.json --diagnostics ret_12_1");
        std::process::exit(1);
    }

    let run: RunFile = serde_json::from_str(&fs::read_to_string(&args[1])?)?;

    let frame = read_csv(&run.panel)?;
    info!(path = %run.panel.display(), rows = frame.height(), "loaded panel file");
    let panel = FramePanelProvider::new(frame, run.panel_schema).panel()?;

    let mut benchmarks = InMemoryBenchmarks::new();
    for file in &run.benchmarks {
        let loaded =
            benchmarks.load_frame(&read_csv(&file.path)?, file.weighting, &run.benchmark_schema)?;
        info!(
            path = %file.path.display(),
            scheme = %file.weighting,
            series = loaded,
            "loaded benchmarks"
        );
    }

    if let Some(column) = parse_diagnostics(&args) {
        let characteristic: Characteristic = column.parse()?;
        print_diagnostics(&panel, characteristic, &run.replication.build)?;
    }

    let report = run_replication(&panel, &benchmarks, &run.replication);
    report.print_summary();

    if !report.all_passed() {
        std::process::exit(2);
    }
    Ok(())
}

fn parse_diagnostics(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|a| a == "--diagnostics")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    LazyCsvReader::new(path).with_has_header(true).with_try_parse_dates(true).finish()?.collect()
}

/// Print bucket composition averaged over all periods.
fn print_diagnostics(
    panel: &CharacteristicPanel,
    characteristic: Characteristic,
    config: &BuildConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = bucket_composition(panel, characteristic, config)?;
    let num_buckets = config.num_buckets;

    println!(
        "\nBUCKET COMPOSITION: {characteristic} ({num_buckets} buckets, averaged over periods)"
    );
    println!("{:<8} {:>10} {:>16} {:>16}", "Bucket", "Entities", "Mean weight", "Mean value");
    println!("{:-<8} {:-^10} {:-^16} {:-^16}", "", "", "", "");
    for bucket in 0..num_buckets {
        let members: Vec<_> = rows.iter().filter(|r| r.bucket == bucket).collect();
        if members.is_empty() {
            continue;
        }
        let n = members.len() as f64;
        println!(
            "{:<8} {:>10.1} {:>16.2} {:>16.4}",
            bucket,
            members.iter().map(|r| r.n_entities as f64).sum::<f64>() / n,
            members.iter().map(|r| r.mean_market_weight).sum::<f64>() / n,
            members.iter().map(|r| r.mean_characteristic).sum::<f64>() / n,
        );
    }
    Ok(())
}
