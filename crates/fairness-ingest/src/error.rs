use thiserror::Error;

/// Problems with a dataset's shape that make it unusable for an audit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("missing required columns: {}", columns.join(", "))]
    MissingRequiredColumns { columns: Vec<String> },

    #[error("protected attribute '{attribute}' not found in dataset")]
    AttributeNotFound { attribute: String },

    #[error("protected attribute '{attribute}' has no valid values")]
    AttributeEmpty { attribute: String },

    #[error("protected attribute '{attribute}' must have at least 2 unique values, found {found}")]
    TooFewGroups { attribute: String, found: usize },
}

pub type Result<T> = std::result::Result<T, IngestError>;
