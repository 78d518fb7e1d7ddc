//! Configuration options for fairness analysis.

use serde::{Deserialize, Serialize};

/// Default number of score quantile bins used for calibration.
pub const DEFAULT_CALIBRATION_BINS: usize = 10;

/// Score movement below this size counts as no movement when comparing.
pub const DEFAULT_COMPARISON_EPSILON: f64 = 1e-6;

/// Group label used for rows whose protected attribute is blank.
pub const DEFAULT_MISSING_GROUP_LABEL: &str = "Unknown";

/// Options controlling a single analysis or comparison.
///
/// Assessment thresholds are deliberately absent: they are fixed policy
/// constants, not per-request configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Number of quantile bins for calibration (duplicate edges are dropped).
    pub calibration_bins: usize,

    /// Minimum score movement for equal assessments to count as a change.
    pub comparison_epsilon: f64,

    /// Group key assigned to rows with an empty protected attribute.
    pub missing_group_label: String,

    /// Metric names to compute; empty means every metric.
    pub metrics: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            calibration_bins: DEFAULT_CALIBRATION_BINS,
            comparison_epsilon: DEFAULT_COMPARISON_EPSILON,
            missing_group_label: DEFAULT_MISSING_GROUP_LABEL.to_string(),
            metrics: Vec::new(),
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calibration_bins(mut self, bins: usize) -> Self {
        self.calibration_bins = bins.max(1);
        self
    }

    pub fn with_comparison_epsilon(mut self, epsilon: f64) -> Self {
        self.comparison_epsilon = epsilon.abs();
        self
    }

    pub fn with_missing_group_label(mut self, label: impl Into<String>) -> Self {
        self.missing_group_label = label.into();
        self
    }

    /// Restrict the analysis to the named metrics.
    pub fn with_metrics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = names.into_iter().map(Into::into).collect();
        self
    }
}
