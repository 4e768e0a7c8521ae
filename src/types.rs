use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// IQR fences computed for one clamped column.
///
/// The bounds are taken from the pre-clamp distribution of the column,
/// so they double as the containment invariant for the output data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClampBounds {
    /// Column the fences were computed for.
    pub column: String,
    /// Lower fence: `Q1 - k*IQR`.
    pub lower: f64,
    /// Upper fence: `Q3 + k*IQR`.
    pub upper: f64,
    /// Number of values replaced by a fence.
    pub values_clamped: usize,
}

/// Summary of a completed pipeline run.
///
/// Serializable for the CLI's `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Timestamp when the run completed.
    pub generated_at: String,

    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows before preprocessing.
    pub rows_before: usize,
    /// Number of rows after preprocessing.
    pub rows_after: usize,
    /// Number of rows removed by the consistency filter.
    pub rows_removed: usize,

    /// Number of columns before preprocessing.
    pub columns_before: usize,
    /// Number of columns after preprocessing.
    pub columns_after: usize,

    /// Fences applied per clamped column.
    pub clamp_bounds: Vec<ClampBounds>,

    /// Human-readable record of each stage's effect.
    pub processing_steps: Vec<String>,

    /// Path of the written CSV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl PipelineReport {
    /// Percentage of rows removed during the run.
    pub fn rows_removed_percentage(&self) -> f64 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed as f64 / self.rows_before as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_removed_percentage() {
        let report = PipelineReport {
            generated_at: String::new(),
            duration_ms: 0,
            rows_before: 200,
            rows_after: 190,
            rows_removed: 10,
            columns_before: 10,
            columns_after: 8,
            clamp_bounds: Vec::new(),
            processing_steps: Vec::new(),
            output_path: None,
        };
        assert_eq!(report.rows_removed_percentage(), 5.0);
    }

    #[test]
    fn test_rows_removed_percentage_empty() {
        let report = PipelineReport {
            generated_at: String::new(),
            duration_ms: 0,
            rows_before: 0,
            rows_after: 0,
            rows_removed: 0,
            columns_before: 0,
            columns_after: 0,
            clamp_bounds: Vec::new(),
            processing_steps: Vec::new(),
            output_path: None,
        };
        assert_eq!(report.rows_removed_percentage(), 0.0);
    }

    #[test]
    fn test_report_json_skips_missing_output_path() {
        let report = PipelineReport {
            generated_at: "2026-01-01 00:00:00".to_string(),
            duration_ms: 12,
            rows_before: 5,
            rows_after: 5,
            rows_removed: 0,
            columns_before: 3,
            columns_after: 3,
            clamp_bounds: Vec::new(),
            processing_steps: vec!["loaded".to_string()],
            output_path: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("output_path"));
    }
}
