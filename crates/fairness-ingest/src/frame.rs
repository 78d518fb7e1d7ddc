//! Conversion from polars frames.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use fairness_model::{CellValue, Dataset, parse_number};

/// Render a polars value as dataset text; nulls become empty.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(b) => if b { "1" } else { "0" }.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Format a float without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Copy every column of `df` into a [`Dataset`], keeping column order.
pub fn dataset_from_frame(df: &DataFrame) -> Dataset {
    let columns: Vec<String> = df
        .get_column_names_owned()
        .into_iter()
        .map(|name| name.as_str().to_string())
        .collect();
    let rows = (0..df.height())
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| {
                    let text = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
                    CellValue::from_raw(&text)
                })
                .collect()
        })
        .collect();
    Dataset::new(columns, rows)
}

/// Build a typed polars frame from a [`Dataset`].
///
/// A column whose present values all parse as numbers becomes `Float64`;
/// every other column stays a string column. Missing cells become nulls.
pub fn frame_from_dataset(dataset: &Dataset) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| typed_column(dataset, idx, name))
        .collect();
    DataFrame::new(columns)
}

fn typed_column(dataset: &Dataset, idx: usize, name: &str) -> Column {
    let texts: Vec<Option<&str>> = dataset.column_values(idx).map(CellValue::as_text).collect();
    let numbers: Option<Vec<Option<f64>>> = texts
        .iter()
        .map(|text| match text {
            Some(value) => parse_number(value).map(Some),
            None => Some(None),
        })
        .collect();
    match numbers {
        Some(values) if values.iter().any(Option::is_some) => {
            Series::new(name.into(), values).into_column()
        }
        _ => Series::new(name.into(), texts).into_column(),
    }
}
