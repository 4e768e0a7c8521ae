//! Identifier column pruning.

use polars::prelude::*;
use tracing::info;

use crate::error::Result;

/// Drops identifier columns that carry no predictive signal.
pub struct IdentifierPruner;

impl IdentifierPruner {
    /// Drops the identifier columns in place.
    ///
    /// The columns are dropped only when every one of them is present.
    /// If any is missing the frame is left untouched and `false` is
    /// returned.
    pub fn prune(
        df: &mut DataFrame,
        identifier_columns: &[String],
        processing_steps: &mut Vec<String>,
    ) -> Result<bool> {
        if identifier_columns.is_empty() {
            return Ok(false);
        }

        let present = df.get_column_names();
        let all_present = identifier_columns
            .iter()
            .all(|c| present.iter().any(|n| n.as_str() == c.as_str()));

        if !all_present {
            info!(
                "Identifier columns {:?} not all present, skipping prune",
                identifier_columns
            );
            processing_steps.push(format!(
                "Skipped identifier prune, {identifier_columns:?} not all present"
            ));
            return Ok(false);
        }

        let names: Vec<PlSmallStr> = identifier_columns
            .iter()
            .map(|c| c.as_str().into())
            .collect();
        *df = df.drop_many(names);

        info!("Dropped identifier columns {:?}", identifier_columns);
        processing_steps.push(format!("Dropped identifier columns {identifier_columns:?}"));
        Ok(true)
    }
}
