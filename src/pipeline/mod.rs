//! Pipeline module.
//!
//! This module provides the main preprocessing pipeline and its stages.

mod builder;
pub mod consistency;
pub mod encoder;
pub mod outliers;
pub mod progress;
pub mod pruner;

pub use builder::{Pipeline, PipelineBuilder};
pub use consistency::LabelConsistencyFilter;
pub use encoder::TypeEncoder;
pub use outliers::OutlierClamper;
pub use progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
pub use pruner::IdentifierPruner;
