//! Ordinal encoding of the product type column.

use polars::prelude::*;
use tracing::{info, warn};

use crate::config::EncodingPolicy;
use crate::error::{PreprocessError, Result};

/// Ordinal codes for the product quality variants, low to high.
const TYPE_CODES: [(&str, i32); 3] = [("L", 1), ("M", 2), ("H", 3)];

fn code_for(value: &str) -> Option<i32> {
    TYPE_CODES
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, code)| *code)
}

/// Replaces the categorical type column with its integer encoding.
pub struct TypeEncoder;

impl TypeEncoder {
    /// Encodes the type column in place as `Int32`.
    ///
    /// Null values stay null under either policy. With
    /// [`EncodingPolicy::Strict`] an unmapped category is an error and the
    /// frame is left unmodified; with [`EncodingPolicy::AllowMissing`]
    /// unmapped categories become null.
    pub fn encode(
        df: &mut DataFrame,
        type_column: &str,
        policy: EncodingPolicy,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = df
            .column(type_column)
            .map_err(|_| PreprocessError::ColumnNotFound(type_column.to_string()))?
            .as_materialized_series()
            .clone();
        let labels = series.str()?;

        let mut unmapped = 0usize;
        let mut codes: Vec<Option<i32>> = Vec::with_capacity(labels.len());
        for label in labels {
            match label {
                None => codes.push(None),
                Some(value) => match code_for(value) {
                    Some(code) => codes.push(Some(code)),
                    None => match policy {
                        EncodingPolicy::Strict => {
                            return Err(PreprocessError::UnmappedCategory {
                                column: type_column.to_string(),
                                value: value.to_string(),
                            });
                        }
                        EncodingPolicy::AllowMissing => {
                            unmapped += 1;
                            codes.push(None);
                        }
                    },
                },
            }
        }

        if unmapped > 0 {
            warn!(
                "Encoded {} unmapped '{}' values as null",
                unmapped, type_column
            );
        }

        let encoded = Series::new(type_column.into(), codes);
        df.replace(type_column, encoded)?;

        info!("Encoded '{}' as ordinal integers (L=1, M=2, H=3)", type_column);
        processing_steps.push(format!(
            "Encoded '{type_column}' as ordinal integers (L=1, M=2, H=3)"
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_codes(df: &DataFrame) -> Vec<Option<i32>> {
        df.column("Type")
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_encode_maps_known_variants() {
        let mut df = df!(
            "Type" => ["L", "M", "H", "M"]
        )
        .expect("Should create test DataFrame");
        let mut steps = Vec::new();

        TypeEncoder::encode(&mut df, "Type", EncodingPolicy::Strict, &mut steps)
            .expect("Should encode");

        assert_eq!(type_codes(&df), vec![Some(1), Some(2), Some(3), Some(2)]);
        assert_eq!(df.column("Type").unwrap().dtype(), &DataType::Int32);
    }

    #[test]
    fn test_strict_rejects_unknown_variant() {
        let mut df = df!(
            "Type" => ["L", "X"]
        )
        .expect("Should create test DataFrame");
        let mut steps = Vec::new();

        let result = TypeEncoder::encode(&mut df, "Type", EncodingPolicy::Strict, &mut steps);

        assert!(matches!(
            result,
            Err(PreprocessError::UnmappedCategory { ref value, .. }) if value == "X"
        ));
        // The column is untouched on error.
        assert_eq!(df.column("Type").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_lenient_nulls_unknown_variant() {
        let mut df = df!(
            "Type" => ["L", "X", "H"]
        )
        .expect("Should create test DataFrame");
        let mut steps = Vec::new();

        TypeEncoder::encode(&mut df, "Type", EncodingPolicy::AllowMissing, &mut steps)
            .expect("Should encode");

        assert_eq!(type_codes(&df), vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn test_null_values_stay_null() {
        let mut df = df!(
            "Type" => [Some("L"), None, Some("H")]
        )
        .expect("Should create test DataFrame");
        let mut steps = Vec::new();

        TypeEncoder::encode(&mut df, "Type", EncodingPolicy::Strict, &mut steps)
            .expect("Should encode");

        assert_eq!(type_codes(&df), vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let mut df = df!(
            "Torque [Nm]" => [42.8]
        )
        .expect("Should create test DataFrame");
        let mut steps = Vec::new();

        let result = TypeEncoder::encode(&mut df, "Type", EncodingPolicy::Strict, &mut steps);

        assert!(matches!(result, Err(PreprocessError::ColumnNotFound(_))));
    }
}
