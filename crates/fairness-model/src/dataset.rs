#![deny(unsafe_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single cell of a parsed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Build a cell from raw text; blank input becomes `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// Column name lookup that ignores case but keeps the original spelling.
#[derive(Debug, Clone, Default)]
pub struct ColumnLookup {
    map: HashMap<String, usize>,
}

impl ColumnLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (idx, name) in names.into_iter().enumerate() {
            let key = name.as_ref().trim().to_ascii_lowercase();
            map.entry(key).or_insert(idx);
        }
        Self { map }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.map.get(&name.trim().to_ascii_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// An immutable, already-parsed tabular dataset.
///
/// Rows are stored in input order; every row has exactly one cell per column.
/// Deserialization goes through [`Dataset::new`], so the same holds for
/// datasets read back from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawDataset")]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    #[serde(skip)]
    lookup: ColumnLookup,
}

/// Wire form of a [`Dataset`] before rows are normalized.
#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<CellValue>>,
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Dataset::new(raw.columns, raw.rows)
    }
}

impl Dataset {
    /// Build a dataset, padding short rows with `Missing` and dropping extra cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        let lookup = ColumnLookup::new(&columns);
        Self {
            columns,
            rows,
            lookup,
        }
    }

    /// Convenience constructor from raw string records.
    pub fn from_records<H, N, R, S>(headers: H, records: R) -> Self
    where
        H: IntoIterator<Item = N>,
        N: AsRef<str>,
        R: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let columns = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .collect();
        let rows = records
            .into_iter()
            .map(|record| {
                record
                    .iter()
                    .map(|cell| CellValue::from_raw(cell.as_ref()))
                    .collect()
            })
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Case-insensitive column index lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.lookup.index_of(name)
    }

    /// Cell at `row`/`column`; out-of-range positions read as `Missing`.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&CellValue::Missing)
    }

    /// Iterate the cells of one column in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&CellValue::Missing))
    }

    /// Return a copy of this dataset with an extra column appended.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let mut columns = self.columns.clone();
        columns.push(name.into());
        let mut values = values.into_iter();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(values.next().unwrap_or(CellValue::Missing));
                row
            })
            .collect();
        Self::new(columns, rows)
    }
}

/// Parse a binary flag cell (`0/1`, `true/false`, `yes/no`, `y/n`).
pub fn parse_binary(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        other => match other.parse::<f64>() {
            Ok(v) if v == 1.0 => Some(true),
            Ok(v) if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

/// Parse a numeric cell, returning `None` for blank or non-numeric text.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let ds = Dataset::from_records(["Gender", "Shortlisted"], vec![vec!["M", "1"]]);
        assert_eq!(ds.column_index("gender"), Some(0));
        assert_eq!(ds.column_index("SHORTLISTED"), Some(1));
        assert!(!ds.has_column("score"));
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = Dataset::from_records(["a", "b"], vec![vec!["1"]]);
        assert_eq!(ds.rows()[0], vec![CellValue::Text("1".into()), CellValue::Missing]);
    }

    #[test]
    fn deserialized_rows_are_normalized() {
        let ds: Dataset = serde_json::from_str(
            r#"{"columns":["gender","Shortlisted"],"rows":[[{"kind":"Text","value":"M"}]]}"#,
        )
        .expect("deserialize dataset");
        assert_eq!(ds.rows()[0].len(), 2);
        assert_eq!(ds.cell(0, 1), &CellValue::Missing);
        assert_eq!(ds.column_index("shortlisted"), Some(1));
        assert_eq!(ds.cell(5, 0), &CellValue::Missing);
    }

    #[test]
    fn binary_parsing() {
        assert_eq!(parse_binary("1"), Some(true));
        assert_eq!(parse_binary("0.0"), Some(false));
        assert_eq!(parse_binary("Yes"), Some(true));
        assert_eq!(parse_binary("2"), None);
        assert_eq!(parse_binary("maybe"), None);
    }

    #[test]
    fn number_parsing_rejects_non_finite() {
        assert_eq!(parse_number(" 42.5 "), Some(42.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }
}
