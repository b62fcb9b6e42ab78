#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod entity;
pub use entity::EntityId;

mod characteristic;
pub use characteristic::{Characteristic, CharacteristicValues};

mod period;
pub use period::{Period, month_end, offset_month_ends};

mod panel;
pub use panel::{CharacteristicPanel, CrossSection, Observation};

mod buckets;
pub use buckets::BucketAssignment;

mod factor;
pub use factor::{FactorDefinition, Polarity, StandardFactor, Weighting};

mod series;
pub use series::{BenchmarkSeries, FactorReturnSeries};

mod error;
pub use error::PanelError;
