//! IQR-based outlier clamping (winsorization).
//!
//! Values outside `[Q1 - k*IQR, Q3 + k*IQR]` are pulled back to the nearest
//! fence rather than dropped, so row count and column alignment are
//! preserved. Quartiles use linear interpolation between order statistics.

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{PreprocessError, Result};
use crate::types::ClampBounds;

/// Clamps outliers in numeric columns using the IQR fence rule.
pub struct OutlierClamper;

impl OutlierClamper {
    /// Clamps each named column to its IQR fences in place.
    ///
    /// Bounds are computed per column from the non-null, non-NaN values of
    /// that column. Null values are left untouched. Returns the bounds and
    /// clamp counts for reporting.
    pub fn clamp_columns(
        df: &mut DataFrame,
        columns: &[String],
        multiplier: f64,
        processing_steps: &mut Vec<String>,
    ) -> Result<Vec<ClampBounds>> {
        let mut all_bounds = Vec::with_capacity(columns.len());

        for column in columns {
            let bounds = Self::clamp_column(df, column, multiplier)?;
            info!(
                "Clamped '{}' to [{:.4}, {:.4}] ({} values adjusted)",
                bounds.column, bounds.lower, bounds.upper, bounds.values_clamped
            );
            processing_steps.push(format!(
                "Clamped '{}' to [{:.4}, {:.4}] ({} values adjusted)",
                bounds.column, bounds.lower, bounds.upper, bounds.values_clamped
            ));
            all_bounds.push(bounds);
        }

        Ok(all_bounds)
    }

    fn clamp_column(df: &mut DataFrame, column: &str, multiplier: f64) -> Result<ClampBounds> {
        let series = df
            .column(column)
            .map_err(|_| PreprocessError::ColumnNotFound(column.to_string()))?
            .as_materialized_series()
            .clone();

        if !is_numeric_dtype(series.dtype()) {
            return Err(PreprocessError::NotNumeric {
                column: column.to_string(),
                dtype: series.dtype().to_string(),
            });
        }

        let values = series.cast(&DataType::Float64)?;
        let ca = values.f64()?;

        let mut finite: Vec<f64> = ca
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return Err(PreprocessError::NoValidValues(column.to_string()));
        }
        finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile_linear(&finite, 0.25);
        let q3 = quantile_linear(&finite, 0.75);
        let iqr = q3 - q1;
        let lower = q1 - multiplier * iqr;
        let upper = q3 + multiplier * iqr;
        debug!(
            "'{}': Q1={:.4}, Q3={:.4}, IQR={:.4}, fences=[{:.4}, {:.4}]",
            column, q1, q3, iqr, lower, upper
        );

        let values_clamped = ca
            .into_iter()
            .flatten()
            .filter(|v| *v < lower || *v > upper)
            .count();

        let clamped = ca.apply(|v| v.map(|x| x.clamp(lower, upper)));
        df.replace(column, clamped.into_series())?;

        Ok(ClampBounds {
            column: column.to_string(),
            lower,
            upper,
            values_clamped,
        })
    }
}

/// Checks whether a dtype is numeric (integer or float).
#[inline]
fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Computes a quantile of pre-sorted values using linear interpolation.
///
/// For `n` values the quantile position is `q * (n - 1)`; fractional
/// positions interpolate between the two surrounding order statistics.
fn quantile_linear(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}
