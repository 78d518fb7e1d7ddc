use serde::{Deserialize, Serialize};

use crate::result::MetricResult;

/// Direction a metric moved between two analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    Improved,
    Worsened,
    Unchanged,
}

impl Change {
    pub fn as_str(&self) -> &'static str {
        match self {
            Change::Improved => "improved",
            Change::Worsened => "worsened",
            Change::Unchanged => "unchanged",
        }
    }
}

/// The same metric from both analyses, annotated with its change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric_name: String,
    pub display_name: String,
    pub baseline: MetricResult,
    pub candidate: MetricResult,
    pub change: Change,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallChange {
    Improved,
    Worsened,
    #[default]
    Similar,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_metrics: usize,
    pub improved: usize,
    pub worsened: usize,
    pub unchanged: usize,
    /// `improved / total_metrics`; `None` when nothing was compared.
    pub improvement_ratio: Option<f64>,
    pub overall: OverallChange,
}

impl ComparisonSummary {
    pub fn from_entries(entries: &[MetricComparison]) -> Self {
        let mut summary = Self {
            total_metrics: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match entry.change {
                Change::Improved => summary.improved += 1,
                Change::Worsened => summary.worsened += 1,
                Change::Unchanged => summary.unchanged += 1,
            }
        }
        if summary.total_metrics > 0 {
            summary.improvement_ratio =
                Some(summary.improved as f64 / summary.total_metrics as f64);
        }
        summary.overall = match summary.improved.cmp(&summary.worsened) {
            std::cmp::Ordering::Greater => OverallChange::Improved,
            std::cmp::Ordering::Less => OverallChange::Worsened,
            std::cmp::Ordering::Equal => OverallChange::Similar,
        };
        summary
    }
}

/// Per-metric diff of two analyses over the same protected attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub protected_attr: String,
    pub metrics_comparison: Vec<MetricComparison>,
    pub summary: ComparisonSummary,
}

impl ComparisonResult {
    pub fn new(
        protected_attr: impl Into<String>,
        metrics_comparison: Vec<MetricComparison>,
    ) -> Self {
        let summary = ComparisonSummary::from_entries(&metrics_comparison);
        Self {
            protected_attr: protected_attr.into(),
            metrics_comparison,
            summary,
        }
    }

    pub fn entry(&self, name: &str) -> Option<&MetricComparison> {
        self.metrics_comparison
            .iter()
            .find(|entry| entry.metric_name == name)
    }
}
