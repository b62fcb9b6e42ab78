#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod sort;
pub use sort::{sort, sort_by_weighted_breakpoints, sort_with_config, sort_with_minimum};

mod aggregate;
pub use aggregate::{LegPortfolio, PortfolioAggregator};

mod builder;
pub use builder::{BuildStats, FactorBuild, FactorBuilder, PortfolioSpec};

mod diagnostics;
pub use diagnostics::{BucketComposition, bucket_composition};

mod config;
pub use config::BuildConfig;

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use super::{BuildConfig, FactorBuild, FactorBuilder, ModelError, PortfolioSpec};
}
