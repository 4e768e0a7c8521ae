//! Configuration types for the preprocessing pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the canonical run: clamp the two sensor columns,
//! filter on `Target` vs `Failure Type`, drop the identifier columns, and
//! encode `Type`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Published spreadsheet holding the raw predictive-maintenance records.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT5qaBV39KxL2ViGJdv1_8J6zOj-U59NGL6BbfxRW_0Mf5mGAWkat7o25CNGKaLJGyry9BAOOaXgiD7/pub?gid=352973935&single=true&output=csv";

/// Default output directory for the processed dataset.
pub const DEFAULT_OUTPUT_DIR: &str = "preprocessing";

/// Default output file name (without extension).
pub const DEFAULT_OUTPUT_NAME: &str =
    "dataset_mesin_membangun_sistem_machine_learning_preprocessing";

/// Policy for categorical values outside the fixed encoding map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EncodingPolicy {
    /// Fail with an error on the first unmapped category.
    #[default]
    Strict,
    /// Replace unmapped categories with a missing value.
    AllowMissing,
}

/// Configuration for the preprocessing pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration with
/// a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use pm_preprocessing::config::{EncodingPolicy, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .output_dir("outputs")
///     .iqr_multiplier(3.0)
///     .encoding_policy(EncodingPolicy::AllowMissing)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Numeric columns to clamp to their IQR fences.
    /// Default: `Rotational speed [rpm]`, `Torque [Nm]`.
    pub clamp_columns: Vec<String>,

    /// Fence multiplier: bounds are `Q1 - k*IQR` and `Q3 + k*IQR`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Binary label column checked by the consistency filter.
    /// Default: `Target`
    pub target_column: String,

    /// Categorical failure label column checked by the consistency filter.
    /// Default: `Failure Type`
    pub failure_type_column: String,

    /// The failure-type value that means "no failure occurred".
    /// Default: `No Failure`
    pub no_failure_label: String,

    /// Categorical column encoded to small integers.
    /// Default: `Type`
    pub type_column: String,

    /// Identifier columns dropped before output, but only when all of
    /// them are present at once.
    /// Default: `UDI`, `Product ID`
    pub identifier_columns: Vec<String>,

    /// Policy for categories outside the encoding map.
    /// Default: Strict
    pub encoding_policy: EncodingPolicy,

    /// Output directory for the processed dataset.
    /// Default: "preprocessing"
    pub output_dir: PathBuf,

    /// Output file name (without extension).
    pub output_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clamp_columns: vec![
                "Rotational speed [rpm]".to_string(),
                "Torque [Nm]".to_string(),
            ],
            iqr_multiplier: 1.5,
            target_column: "Target".to_string(),
            failure_type_column: "Failure Type".to_string(),
            no_failure_label: "No Failure".to_string(),
            type_column: "Type".to_string(),
            identifier_columns: vec!["UDI".to_string(), "Product ID".to_string()],
            encoding_policy: EncodingPolicy::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        for name in self
            .clamp_columns
            .iter()
            .chain(self.identifier_columns.iter())
            .chain([
                &self.target_column,
                &self.failure_type_column,
                &self.type_column,
            ])
        {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName);
            }
        }

        if self.output_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputName);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid IQR multiplier: {0} (must be finite and greater than 0)")]
    InvalidIqrMultiplier(f64),

    #[error("Column names must not be empty")]
    EmptyColumnName,

    #[error("Output file name must not be empty")]
    EmptyOutputName,
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    clamp_columns: Option<Vec<String>>,
    iqr_multiplier: Option<f64>,
    target_column: Option<String>,
    failure_type_column: Option<String>,
    no_failure_label: Option<String>,
    type_column: Option<String>,
    identifier_columns: Option<Vec<String>>,
    encoding_policy: Option<EncodingPolicy>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
}

impl PipelineConfigBuilder {
    /// Set the numeric columns clamped to their IQR fences.
    pub fn clamp_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clamp_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the IQR fence multiplier.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the binary label column for the consistency filter.
    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    /// Set the categorical failure label column for the consistency filter.
    pub fn failure_type_column(mut self, column: impl Into<String>) -> Self {
        self.failure_type_column = Some(column.into());
        self
    }

    /// Set the failure-type value that means "no failure occurred".
    pub fn no_failure_label(mut self, label: impl Into<String>) -> Self {
        self.no_failure_label = Some(label.into());
        self
    }

    /// Set the categorical column encoded to small integers.
    pub fn type_column(mut self, column: impl Into<String>) -> Self {
        self.type_column = Some(column.into());
        self
    }

    /// Set the identifier columns dropped before output.
    pub fn identifier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the policy for categories outside the encoding map.
    pub fn encoding_policy(mut self, policy: EncodingPolicy) -> Self {
        self.encoding_policy = Some(policy);
        self
    }

    /// Set the output directory for the processed dataset.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the output file name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();

        let config = PipelineConfig {
            clamp_columns: self.clamp_columns.unwrap_or(defaults.clamp_columns),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            target_column: self.target_column.unwrap_or(defaults.target_column),
            failure_type_column: self
                .failure_type_column
                .unwrap_or(defaults.failure_type_column),
            no_failure_label: self.no_failure_label.unwrap_or(defaults.no_failure_label),
            type_column: self.type_column.unwrap_or(defaults.type_column),
            identifier_columns: self
                .identifier_columns
                .unwrap_or(defaults.identifier_columns),
            encoding_policy: self.encoding_policy.unwrap_or_default(),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_name: self.output_name.unwrap_or(defaults.output_name),
        };

        config.validate()?;
        Ok(config)
    }
}
