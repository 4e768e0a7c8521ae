//! Custom error types for the preprocessing pipeline.
//!
//! This module provides the error hierarchy using `thiserror`, with a
//! context-wrapping extension trait for annotating lower-level failures.

use thiserror::Error;

/// The main error type for the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// Dataset retrieval or parsing failed.
    #[error("Failed to load dataset from '{origin}': {reason}")]
    LoadFailed { origin: String, reason: String },

    /// The loaded dataset has no rows; downstream stages are skipped.
    #[error("Dataset is empty, nothing to process")]
    EmptyDataset,

    /// A column required by a stage was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A column expected to be numeric could not be treated as numeric.
    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NotNumeric { column: String, dtype: String },

    /// No non-null values found in a column for quartile computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// A categorical value outside the fixed encoding map, under strict policy.
    #[error("Unmapped category '{value}' in column '{column}'")]
    UnmappedCategory { column: String, value: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// HTTP request error from the remote dataset source.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PreprocessError>,
    },
}

impl PreprocessError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PreprocessError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error takes the pipeline's aborted branch: a diagnostic
    /// is printed and no output file is written, but the process exits
    /// normally rather than reporting a hard failure.
    pub fn is_abort(&self) -> bool {
        match self {
            Self::LoadFailed { .. } | Self::EmptyDataset => true,
            Self::WithContext { source, .. } => source.is_abort(),
            _ => false,
        }
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PreprocessError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PreprocessError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_abort() {
        assert!(PreprocessError::EmptyDataset.is_abort());
        assert!(
            PreprocessError::LoadFailed {
                origin: "data.csv".to_string(),
                reason: "file not found".to_string(),
            }
            .is_abort()
        );
        assert!(!PreprocessError::ColumnNotFound("Target".to_string()).is_abort());
    }

    #[test]
    fn test_is_abort_through_context() {
        let error = PreprocessError::EmptyDataset.with_context("after loading");
        assert!(error.is_abort());
    }

    #[test]
    fn test_with_context() {
        let error =
            PreprocessError::ColumnNotFound("Torque [Nm]".to_string()).with_context("clamping");
        assert!(error.to_string().contains("clamping"));
        assert!(error.to_string().contains("Torque [Nm]"));
    }
}
