//! Main preprocessing pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the predictive-maintenance preprocessing workflow.

use crate::config::PipelineConfig;
use crate::error::{PreprocessError, Result};
use crate::pipeline::consistency::LabelConsistencyFilter;
use crate::pipeline::encoder::TypeEncoder;
use crate::pipeline::outliers::OutlierClamper;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::pipeline::pruner::IdentifierPruner;
use crate::types::PipelineReport;
use crate::writer::OutputWriter;
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// The main preprocessing pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use pm_preprocessing::{Pipeline, PipelineConfig};
///
/// let report = Pipeline::builder()
///     .config(PipelineConfig::default())
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .process(dataframe)?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    writer: OutputWriter,
}

// Ensure Pipeline is Send (can be moved to another thread)
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Process a DataFrame through the preprocessing pipeline.
    ///
    /// Returns a [`PipelineReport`] describing what was done and where the
    /// output was written.
    ///
    /// # Errors
    ///
    /// Returns `Err(PreprocessError::EmptyDataset)` for a frame with no
    /// rows; no output file is written in that case. Other errors may
    /// occur during processing.
    pub fn process(&self, df: DataFrame) -> Result<PipelineReport> {
        match self.process_internal(df) {
            Ok(report) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(report)
            }
            Err(e) => {
                if e.is_abort() {
                    self.report_progress(ProgressUpdate::aborted(e.to_string()));
                } else {
                    self.report_progress(ProgressUpdate::failed(e.to_string()));
                }
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_internal(&self, mut df: DataFrame) -> Result<PipelineReport> {
        let start_time = Instant::now();

        info!("Starting preprocessing pipeline...");
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Initializing,
            0.0,
            "Starting preprocessing pipeline...",
        ));

        if df.height() == 0 {
            return Err(PreprocessError::EmptyDataset);
        }

        let rows_before = df.height();
        let columns_before = df.width();
        let mut processing_steps: Vec<String> = Vec::new();

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Initializing,
            1.0,
            format!("Loaded {} rows x {} columns", rows_before, columns_before),
        ));

        // Step 1: Clamp outliers to their IQR fences
        self.report_progress(ProgressUpdate::new(
            PipelineStage::OutlierClamping,
            0.0,
            "Clamping outliers...",
        ));
        info!("Step 1: Clamping outliers...");
        let clamp_bounds = OutlierClamper::clamp_columns(
            &mut df,
            &self.config.clamp_columns,
            self.config.iqr_multiplier,
            &mut processing_steps,
        )?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::OutlierClamping,
            1.0,
            "Outlier clamping complete",
        ));

        // Step 2: Drop rows with contradictory labels
        self.report_progress(ProgressUpdate::new(
            PipelineStage::ConsistencyFiltering,
            0.0,
            "Filtering contradictory labels...",
        ));
        info!("Step 2: Filtering contradictory labels...");
        LabelConsistencyFilter::filter(
            &mut df,
            &self.config.target_column,
            &self.config.failure_type_column,
            &self.config.no_failure_label,
            &mut processing_steps,
        )?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::ConsistencyFiltering,
            1.0,
            "Label filtering complete",
        ));

        // Step 3: Drop identifier columns
        self.report_progress(ProgressUpdate::new(
            PipelineStage::ColumnPruning,
            0.0,
            "Pruning identifier columns...",
        ));
        info!("Step 3: Pruning identifier columns...");
        IdentifierPruner::prune(
            &mut df,
            &self.config.identifier_columns,
            &mut processing_steps,
        )?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::ColumnPruning,
            1.0,
            "Column pruning complete",
        ));

        // Step 4: Encode the product type column
        self.report_progress(ProgressUpdate::new(
            PipelineStage::CategoryEncoding,
            0.0,
            "Encoding categorical column...",
        ));
        info!("Step 4: Encoding categorical column...");
        TypeEncoder::encode(
            &mut df,
            &self.config.type_column,
            self.config.encoding_policy,
            &mut processing_steps,
        )?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::CategoryEncoding,
            1.0,
            "Category encoding complete",
        ));

        // Step 5: Write the processed dataset
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Writing,
            0.0,
            "Writing processed dataset...",
        ));
        info!("Step 5: Writing processed dataset...");
        let output_path = self.writer.write(&mut df)?;
        processing_steps.push(format!("Saved processed dataset to {}", output_path.display()));
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Writing,
            1.0,
            "Dataset saved",
        ));

        let rows_after = df.height();
        Ok(PipelineReport {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_ms: start_time.elapsed().as_millis() as u64,
            rows_before,
            rows_after,
            rows_removed: rows_before.saturating_sub(rows_after),
            columns_before,
            columns_after: df.width(),
            clamp_bounds,
            processing_steps,
            output_path: Some(output_path),
        })
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    ///
    /// Use this when you need a custom progress reporter implementation.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, crate::config::ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let writer = OutputWriter::new(config.output_dir.clone(), config.output_name.clone());

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            writer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert!(pipeline.progress_reporter.is_none());
        assert_eq!(pipeline.config.iqr_multiplier, 1.5);
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let config = PipelineConfig::builder().iqr_multiplier(-1.0).build();
        assert!(config.is_err());
    }

    #[test]
    fn test_pipeline_builder_with_progress_callback() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let pipeline = Pipeline::builder()
            .on_progress(move |_update| {
                call_count_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        pipeline.report_progress(ProgressUpdate::new(
            PipelineStage::OutlierClamping,
            0.5,
            "Test",
        ));

        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_dataframe_aborts() {
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(DataFrame::empty());

        let err = result.unwrap_err();
        assert!(matches!(err, PreprocessError::EmptyDataset));
        assert!(err.is_abort());
    }

    #[test]
    fn test_abort_reports_aborted_stage() {
        let last_stage = Arc::new(std::sync::Mutex::new(None));
        let last_stage_clone = last_stage.clone();

        let pipeline = Pipeline::builder()
            .on_progress(move |update| {
                *last_stage_clone.lock().unwrap() = Some(update.stage);
            })
            .build()
            .unwrap();

        let _ = pipeline.process(DataFrame::empty());

        assert_eq!(*last_stage.lock().unwrap(), Some(PipelineStage::Aborted));
    }
}
