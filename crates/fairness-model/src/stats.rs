//! Per-group raw counts and the dataset capability set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column holding the binary selection outcome.
pub const SHORTLISTED_COLUMN: &str = "shortlisted";
/// Column holding the ground-truth label.
pub const ACTUAL_COLUMN: &str = "actual";
/// Column holding the model prediction.
pub const PREDICTED_COLUMN: &str = "predicted";
/// Column holding the 0-100 screening confidence.
pub const SCORE_COLUMN: &str = "score";

/// Input columns a metric may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputColumn {
    Shortlisted,
    Actual,
    Predicted,
    Score,
}

impl InputColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            InputColumn::Shortlisted => SHORTLISTED_COLUMN,
            InputColumn::Actual => ACTUAL_COLUMN,
            InputColumn::Predicted => PREDICTED_COLUMN,
            InputColumn::Score => SCORE_COLUMN,
        }
    }
}

impl fmt::Display for InputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Which optional columns are usable, decided once per analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCapabilities {
    /// `actual` and `predicted` are present and populated on every row.
    pub has_outcomes: bool,
    /// `score` is present with at least one numeric value.
    pub has_scores: bool,
}

impl DatasetCapabilities {
    pub fn provides(&self, column: InputColumn) -> bool {
        match column {
            InputColumn::Shortlisted => true,
            InputColumn::Actual | InputColumn::Predicted => self.has_outcomes,
            InputColumn::Score => self.has_scores,
        }
    }

    pub fn satisfies(&self, required: &[InputColumn]) -> bool {
        required.iter().all(|column| self.provides(*column))
    }
}

/// Confusion-matrix counts of `predicted` against `actual`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionCounts {
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

/// A score paired with the observed outcome of the same row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutcome {
    pub score: f64,
    pub positive: bool,
}

/// Raw counts for one protected-attribute group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub total: u64,
    pub selected: u64,
    /// `None` when the dataset has no usable `actual`/`predicted` columns.
    pub confusion: Option<ConfusionCounts>,
    pub scores: Vec<ScoredOutcome>,
}

impl GroupStats {
    /// Fresh stats; confusion counts start at zero only when outcomes exist.
    pub fn new(capabilities: DatasetCapabilities) -> Self {
        Self {
            confusion: capabilities
                .has_outcomes
                .then(ConfusionCounts::default),
            ..Self::default()
        }
    }
}
