//! Predictive Maintenance Preprocessing Library
//!
//! A preprocessing pipeline for the AI4I-style predictive maintenance
//! dataset, built with Rust and Polars.
//!
//! # Overview
//!
//! This library turns a raw machine-sensor CSV into a model-ready dataset:
//!
//! - **Loading**: Reads the dataset from a local path or an HTTP(S) URL
//! - **Outlier Clamping**: Winsorizes sensor columns to their IQR fences
//! - **Label Consistency**: Drops rows whose target contradicts the failure type
//! - **Column Pruning**: Removes identifier columns with no predictive signal
//! - **Category Encoding**: Maps the product type to ordinal integers
//! - **Writing**: Saves the result as a headered CSV, overwriting any previous run
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pm_preprocessing::{loader, Pipeline, PipelineConfig};
//!
//! let df = loader::load("ai4i2020.csv")?;
//!
//! let report = Pipeline::builder()
//!     .config(PipelineConfig::builder().output_dir("preprocessing").build()?)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .process(df)?;
//!
//! println!("Rows kept: {}", report.rows_after);
//! ```
//!
//! # Configuration
//!
//! Use [`PipelineConfig`] to customize the columns and thresholds:
//!
//! ```rust,ignore
//! use pm_preprocessing::{EncodingPolicy, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .iqr_multiplier(3.0)
//!     .encoding_policy(EncodingPolicy::AllowMissing)
//!     .output_dir("out")
//!     .build()?;
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod writer;

pub use config::{
    ConfigValidationError, EncodingPolicy, PipelineConfig, PipelineConfigBuilder,
    DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_NAME, DEFAULT_SOURCE_URL,
};
pub use error::{PreprocessError, Result, ResultExt};
pub use pipeline::{
    ClosureProgressReporter, IdentifierPruner, LabelConsistencyFilter, OutlierClamper, Pipeline,
    PipelineBuilder, PipelineStage, ProgressReporter, ProgressUpdate, TypeEncoder,
};
pub use types::{ClampBounds, PipelineReport};
pub use writer::OutputWriter;
