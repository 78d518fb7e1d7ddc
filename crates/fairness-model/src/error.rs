use thiserror::Error;

/// Fatal errors raised by the fairness engine.
///
/// Sparse data never raises: undefined rates are reported as `None` and
/// metrics whose optional columns are absent are left out of the results.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FairnessError {
    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    #[error("protected attribute mismatch: {detail}")]
    AttributeMismatch { detail: String },

    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("unknown metric: {name}")]
    UnknownMetric { name: String },

    #[error("invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

impl FairnessError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn attribute_mismatch(detail: impl Into<String>) -> Self {
        Self::AttributeMismatch {
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FairnessError>;
