//! # factorcheck
//!
//! Replication of standard long-short academic equity factors from firm-level
//! characteristics, validated against published benchmark factor series.
//!
//! This crate provides a unified interface to the factorcheck workspace.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Panel, series and factor definition types
//! - `traits`: Panel and benchmark provider interfaces
//! - `math`: Ranking, leg weighting and statistics
//! - `model`: Cross-sectional sorts and factor construction
//! - `validate`: Benchmark alignment, validation and replication runs
//! - `utils`: Polars ingestion and raw data checks
//! - `cli`: The `replicate` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use factorcheck::{utils::InMemoryBenchmarks, validate::{ReplicationConfig, run_replication}};
//!
//! let report = run_replication(&panel, &benchmarks, &ReplicationConfig::default());
//! report.print_summary();
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorcheck/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use factorcheck_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use factorcheck_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use factorcheck_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use factorcheck_model as model;
#[cfg(feature = "validate")]
#[doc(inline)]
pub use factorcheck_validate as validate;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use factorcheck_utils as utils;
