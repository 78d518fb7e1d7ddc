//! Dataset statistics and row previews for inspection.

use std::collections::{BTreeMap, HashMap};

use polars::prelude::{
    ChunkAgg, ChunkQuantile, ChunkVar, Column, DataFrame, DataType, PolarsResult,
};
use serde::{Deserialize, Serialize};

use fairness_model::{CellValue, Dataset};

use crate::frame::frame_from_dataset;

/// Number of most frequent values kept for a categorical column.
pub const TOP_VALUES_LIMIT: usize = 10;

/// Rows shown by a dataset preview unless the caller asks otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

/// Shape, missing counts and per-column summaries of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub missing_values: BTreeMap<String, usize>,
    pub column_stats: BTreeMap<String, ColumnStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStatistics {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Summary of a numeric column; every field is `None` when the column is all null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique_values: usize,
    pub top_values: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl DatasetStatistics {
    pub fn from_dataset(dataset: &Dataset) -> PolarsResult<Self> {
        let df = frame_from_dataset(dataset)?;
        Self::from_frame(&df)
    }

    pub fn from_frame(df: &DataFrame) -> PolarsResult<Self> {
        let mut stats = DatasetStatistics {
            rows: df.height(),
            columns: df.width(),
            numeric_columns: Vec::new(),
            categorical_columns: Vec::new(),
            missing_values: BTreeMap::new(),
            column_stats: BTreeMap::new(),
        };

        for col in df.get_columns() {
            let name = col.name().to_string();
            stats.missing_values.insert(name.clone(), col.null_count());
            let summary = if is_numeric(col.dtype()) {
                stats.numeric_columns.push(name.clone());
                ColumnStatistics::Numeric(numeric_summary(col)?)
            } else {
                stats.categorical_columns.push(name.clone());
                ColumnStatistics::Categorical(categorical_summary(col)?)
            };
            stats.column_stats.insert(name, summary);
        }

        Ok(stats)
    }

    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }
}

fn is_numeric(dtype: &DataType) -> bool {
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

fn numeric_summary(col: &Column) -> PolarsResult<NumericSummary> {
    let series = col.as_materialized_series().cast(&DataType::Float64)?;
    let values = series.f64()?;
    Ok(NumericSummary {
        mean: values.mean(),
        median: values.median(),
        min: values.min(),
        max: values.max(),
        std: values.std(1),
    })
}

fn categorical_summary(col: &Column) -> PolarsResult<CategoricalSummary> {
    let series = col.as_materialized_series().cast(&DataType::String)?;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in series.str()?.iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let unique_values = counts.len();
    let mut top_values: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    top_values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    top_values.truncate(TOP_VALUES_LIMIT);

    Ok(CategoricalSummary {
        unique_values,
        top_values,
    })
}

/// First `max_rows` rows as text cells; missing cells are `None`.
pub fn preview_rows(dataset: &Dataset, max_rows: usize) -> Vec<Vec<Option<String>>> {
    let width = dataset.columns().len();
    dataset
        .rows()
        .iter()
        .take(max_rows)
        .map(|row| {
            (0..width)
                .map(|idx| {
                    row.get(idx)
                        .and_then(CellValue::as_text)
                        .map(str::to_string)
                })
                .collect()
        })
        .collect()
}
