//! Label consistency filtering.
//!
//! A row is contradictory when its binary target disagrees with its
//! failure-type label: target 0 must carry the no-failure label, target 1
//! must not. Rows with any other target value pass through unchanged.

use polars::prelude::*;
use tracing::info;

use crate::error::{PreprocessError, Result};

/// Removes rows whose target and failure-type labels contradict each other.
pub struct LabelConsistencyFilter;

impl LabelConsistencyFilter {
    /// Filters contradictory rows in place and returns the number removed.
    ///
    /// A null failure-type label never equals the no-failure label, so a
    /// row with target 0 and a null label is contradictory while a row
    /// with target 1 and a null label is kept. Rows with a null target
    /// are kept.
    pub fn filter(
        df: &mut DataFrame,
        target_column: &str,
        failure_type_column: &str,
        no_failure_label: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let targets = df
            .column(target_column)
            .map_err(|_| PreprocessError::ColumnNotFound(target_column.to_string()))?
            .as_materialized_series()
            .clone();
        let labels = df
            .column(failure_type_column)
            .map_err(|_| PreprocessError::ColumnNotFound(failure_type_column.to_string()))?
            .as_materialized_series()
            .clone();

        let targets = targets
            .cast(&DataType::Int64)
            .map_err(|_| PreprocessError::NotNumeric {
                column: target_column.to_string(),
                dtype: targets.dtype().to_string(),
            })?;
        let targets = targets.i64()?;
        let labels = labels.str()?;

        let keep: Vec<bool> = targets
            .into_iter()
            .zip(labels)
            .map(|(target, label)| match target {
                Some(0) => matches!(label, Some(l) if l == no_failure_label),
                Some(1) => !matches!(label, Some(l) if l == no_failure_label),
                _ => true,
            })
            .collect();

        let rows_before = df.height();
        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        *df = df.filter(&mask)?;
        let removed = rows_before - df.height();

        info!(
            "Removed {} contradictory rows ({} remaining)",
            removed,
            df.height()
        );
        processing_steps.push(format!(
            "Removed {removed} rows with contradictory '{target_column}' / '{failure_type_column}' labels"
        ));

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filter(df: &mut DataFrame) -> usize {
        let mut steps = Vec::new();
        LabelConsistencyFilter::filter(df, "Target", "Failure Type", "No Failure", &mut steps)
            .expect("Should filter")
    }

    #[test]
    fn test_contradictory_rows_are_removed() {
        let mut df = df!(
            "Target" => [0i64, 0, 1, 1],
            "Failure Type" => ["No Failure", "Power Failure", "Tool Wear Failure", "No Failure"]
        )
        .expect("Should create test DataFrame");

        let removed = filter(&mut df);

        // Row 1 (target 0, labelled failure) and row 3 (target 1, no failure)
        // are contradictory.
        assert_eq!(removed, 2);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_consistent_rows_are_kept() {
        let mut df = df!(
            "Target" => [0i64, 1],
            "Failure Type" => ["No Failure", "Heat Dissipation Failure"]
        )
        .expect("Should create test DataFrame");

        let removed = filter(&mut df);

        assert_eq!(removed, 0);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_null_label_with_target_zero_is_removed() {
        let mut df = df!(
            "Target" => [0i64, 1],
            "Failure Type" => [None::<&str>, None]
        )
        .expect("Should create test DataFrame");

        let removed = filter(&mut df);

        // A null label is not the no-failure label, so target 0 is
        // contradictory and target 1 is consistent.
        assert_eq!(removed, 1);
        let remaining: Vec<Option<i64>> = df
            .column("Target")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(remaining, vec![Some(1)]);
    }

    #[test]
    fn test_unexpected_target_values_pass_through() {
        let mut df = df!(
            "Target" => [Some(2i64), None, Some(0)],
            "Failure Type" => [Some("No Failure"), Some("No Failure"), Some("No Failure")]
        )
        .expect("Should create test DataFrame");

        let removed = filter(&mut df);

        assert_eq!(removed, 0);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_missing_target_column_is_an_error() {
        let mut df = df!(
            "Failure Type" => ["No Failure"]
        )
        .expect("Should create test DataFrame");
        let mut steps = Vec::new();

        let result = LabelConsistencyFilter::filter(
            &mut df,
            "Target",
            "Failure Type",
            "No Failure",
            &mut steps,
        );

        assert!(matches!(
            result,
            Err(PreprocessError::ColumnNotFound(ref c)) if c == "Target"
        ));
    }
}
