//! Structural checks run before a dataset is analyzed.

use std::collections::BTreeSet;

use fairness_model::{Dataset, SHORTLISTED_COLUMN};

use crate::error::{IngestError, Result};

/// Columns every audited dataset must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[SHORTLISTED_COLUMN];

pub fn validate_required_columns(dataset: &Dataset) -> Result<()> {
    let columns: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !dataset.has_column(column))
        .map(|column| (*column).to_string())
        .collect();
    if columns.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingRequiredColumns { columns })
    }
}

/// The attribute must exist, hold at least one value and split rows into at
/// least two groups.
pub fn validate_protected_attribute(dataset: &Dataset, attribute: &str) -> Result<()> {
    let Some(idx) = dataset.column_index(attribute) else {
        return Err(IngestError::AttributeNotFound {
            attribute: attribute.to_string(),
        });
    };
    let distinct: BTreeSet<&str> = dataset
        .column_values(idx)
        .filter_map(|cell| cell.as_text())
        .collect();
    match distinct.len() {
        0 => Err(IngestError::AttributeEmpty {
            attribute: attribute.to_string(),
        }),
        1 => Err(IngestError::TooFewGroups {
            attribute: attribute.to_string(),
            found: 1,
        }),
        _ => Ok(()),
    }
}
