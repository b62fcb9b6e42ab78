#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod align;
pub use align::{AlignedPair, align};

mod validate;
pub use validate::{FitStatistics, ValidationConfig, ValidationResult, Validator, validate};

mod report;
pub use report::{FactorOutcome, ReplicationReport};

mod runner;
pub use runner::{ReplicationConfig, replicate_factor, run_replication};

mod error;
pub use error::ValidationError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ReplicationConfig, ReplicationReport, ValidationConfig, ValidationError, ValidationResult,
        Validator, run_replication,
    };
}
