#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod schema;
pub use schema::{BenchmarkSchema, PanelSchema, ReturnTiming};

mod checks;
pub use checks::{MAX_PLAUSIBLE_RETURN, RawDataReport, check_raw_frame};

mod frame;
pub use frame::{benchmark_from_frame, benchmark_names, panel_from_frame};

mod provider;
pub use provider::{FramePanelProvider, InMemoryBenchmarks};

mod error;
pub use error::UtilsError;
