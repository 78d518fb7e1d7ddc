//! Load a dataset file into an audit-ready [`Dataset`].

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info_span};

use fairness_model::Dataset;

use crate::age::{AGE_GROUP_COLUMN, derive_age_group};
use crate::csv_table::read_csv_table;
use crate::store::DatasetId;
use crate::validate::validate_required_columns;

/// Facts about a loaded dataset, reported alongside analysis output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetMetadata {
    pub dataset_id: DatasetId,
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub has_age_group: bool,
    /// RFC 3339 timestamp.
    pub loaded_at: String,
}

/// A validated dataset together with its metadata.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub metadata: DatasetMetadata,
}

/// Prepare a parsed dataset for auditing.
///
/// Derives `age_group` from `age` when needed and checks required columns.
pub fn prepare_dataset(dataset: Dataset, filename: &str) -> Result<LoadedDataset> {
    let dataset = match derive_age_group(&dataset) {
        Some(derived) => {
            debug!(filename, "derived age_group from age");
            derived
        }
        None => dataset,
    };
    validate_required_columns(&dataset).with_context(|| format!("validate {filename}"))?;

    let metadata = DatasetMetadata {
        dataset_id: DatasetId::of(&dataset),
        filename: filename.to_string(),
        rows: dataset.len(),
        columns: dataset.columns().len(),
        column_names: dataset.columns().to_vec(),
        has_age_group: dataset.has_column(AGE_GROUP_COLUMN),
        loaded_at: Utc::now().to_rfc3339(),
    };
    Ok(LoadedDataset { dataset, metadata })
}

/// Read and prepare a CSV dataset.
pub fn load_csv_dataset(path: &Path) -> Result<LoadedDataset> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();

    let table = read_csv_table(path)?;
    if table.headers.is_empty() {
        anyhow::bail!("no header row in {}", path.display());
    }
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let loaded = prepare_dataset(table.into_dataset(), &filename)?;
    debug!(
        dataset_id = %loaded.metadata.dataset_id,
        rows = loaded.metadata.rows,
        columns = loaded.metadata.columns,
        "loaded dataset"
    );
    Ok(loaded)
}
