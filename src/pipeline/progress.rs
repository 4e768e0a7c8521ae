//! Progress reporting for the preprocessing pipeline.
//!
//! The pipeline is strictly sequential, so progress is tracked per stage
//! with a fixed weight per stage. Reporters must be `Send + Sync` so the
//! pipeline can run on a background thread.

use serde::{Deserialize, Serialize};

/// Stages of the preprocessing pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Pipeline is starting and checking the loaded frame
    Initializing,
    /// Clamping numeric columns to their IQR fences
    OutlierClamping,
    /// Removing rows with inconsistent target/failure-type labels
    ConsistencyFiltering,
    /// Dropping identifier columns
    ColumnPruning,
    /// Encoding the product type column to integers
    CategoryEncoding,
    /// Writing the processed CSV
    Writing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline stopped early on an empty or unloadable dataset
    Aborted,
    /// Pipeline failed with an error
    Failed,
}

impl PipelineStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::OutlierClamping => "Clamping Outliers",
            Self::ConsistencyFiltering => "Filtering Labels",
            Self::ColumnPruning => "Pruning Columns",
            Self::CategoryEncoding => "Encoding Categories",
            Self::Writing => "Writing Output",
            Self::Complete => "Complete",
            Self::Aborted => "Aborted",
            Self::Failed => "Failed",
        }
    }

    /// Returns the weight of this stage in the overall pipeline (0.0 - 1.0).
    ///
    /// The weights sum to ~1.0 for the processing stages (excluding
    /// terminal states).
    pub fn weight(&self) -> f32 {
        match self {
            Self::Initializing => 0.05,
            Self::OutlierClamping => 0.30,
            Self::ConsistencyFiltering => 0.25,
            Self::ColumnPruning => 0.05,
            Self::CategoryEncoding => 0.15,
            Self::Writing => 0.20,
            Self::Complete => 0.0,
            Self::Aborted => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Initializing => 0.0,
            Self::OutlierClamping => 0.05,
            Self::ConsistencyFiltering => 0.35,
            Self::ColumnPruning => 0.60,
            Self::CategoryEncoding => 0.65,
            Self::Writing => 0.80,
            Self::Complete => 1.0,
            Self::Aborted => 0.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress notification from the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: PipelineStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within the current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: PipelineStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    /// Creates an aborted progress update.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Aborted,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates during preprocessing.
///
/// Implementations must be `Send + Sync` to allow cross-thread usage.
pub trait ProgressReporter: Send + Sync {
    /// Called when progress is made during preprocessing.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
///
/// # Example
///
/// ```rust,ignore
/// use pm_preprocessing::Pipeline;
///
/// Pipeline::builder()
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .process(df);
/// ```
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
