#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cross_section;
pub use cross_section::{bucket_for_rank, rank_buckets, stable_ranks};

mod weights;
pub use weights::{cap_weights, equal_weights, normalize_weights};

mod stats;
pub use stats::{annualized_volatility, mean, pearson_correlation, quantile, sample_std};

mod error;
pub use error::MathError;
