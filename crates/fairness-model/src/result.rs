//! Metric results and the per-analysis summary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;
use crate::ids::GroupKey;

/// Chart family a metric's data is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    Bar,
    Scatter,
    Metric,
    Heatmap,
}

impl VisualizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationType::Bar => "bar",
            VisualizationType::Scatter => "scatter",
            VisualizationType::Metric => "metric",
            VisualizationType::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True/false positive rate pair for one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsPoint {
    pub tpr: Option<f64>,
    pub fpr: Option<f64>,
}

/// Data a chart is drawn from, tagged by `visualization_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "visualization_type", rename_all = "lowercase")]
pub enum VisualizationData {
    Bar,
    Metric,
    Scatter { points: BTreeMap<GroupKey, OddsPoint> },
    Heatmap { bins: Vec<String> },
}

impl VisualizationData {
    pub fn visualization_type(&self) -> VisualizationType {
        match self {
            VisualizationData::Bar => VisualizationType::Bar,
            VisualizationData::Metric => VisualizationType::Metric,
            VisualizationData::Scatter { .. } => VisualizationType::Scatter,
            VisualizationData::Heatmap { .. } => VisualizationType::Heatmap,
        }
    }
}

/// Computed metric values. `None` marks an undefined value (zero denominator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValues {
    Scalar(Option<f64>),
    PerGroup(BTreeMap<GroupKey, Option<f64>>),
    PerGroupSeries(BTreeMap<GroupKey, Vec<Option<f64>>>),
}

impl MetricValues {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricValues::Scalar(value) => *value,
            _ => None,
        }
    }

    pub fn group(&self, key: &str) -> Option<f64> {
        match self {
            MetricValues::PerGroup(map) => map.get(&GroupKey::new(key)).copied().flatten(),
            _ => None,
        }
    }

    /// Every defined number carried by these values.
    pub fn defined(&self) -> Vec<f64> {
        match self {
            MetricValues::Scalar(value) => value.iter().copied().collect(),
            MetricValues::PerGroup(map) => map.values().filter_map(|v| *v).collect(),
            MetricValues::PerGroupSeries(map) => map
                .values()
                .flat_map(|series| series.iter().filter_map(|v| *v))
                .collect(),
        }
    }
}

/// Static and assessment-dependent explanation text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Explanation {
    pub display_name: String,
    pub definition: String,
    pub interpretation: String,
    pub context: String,
    /// Value-segment label for the current assessment (e.g. "Strong imbalance").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_this_means: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_is_wrong: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub root_causes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recruiter_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_recommendation: Option<String>,
}

/// Outcome of evaluating and classifying a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric_name: String,
    pub values: MetricValues,
    /// Scalar the assessment was derived from; `None` when inconclusive.
    pub score: Option<f64>,
    pub visualization_data: VisualizationData,
    pub fairness_assessment: Assessment,
    pub explanation: Explanation,
}

/// Row counts for one group, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: GroupKey,
    pub total: u64,
    pub selected: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallAssessment {
    #[default]
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

/// Assessment counts. Field names are singular by contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_metrics: usize,
    pub fair: usize,
    pub warning: usize,
    pub violation: usize,
    pub inconclusive: usize,
    pub overall_assessment: OverallAssessment,
}

impl AnalysisSummary {
    pub fn from_results(results: &[MetricResult]) -> Self {
        let mut summary = Self {
            total_metrics: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.fairness_assessment {
                Assessment::Fair => summary.fair += 1,
                Assessment::Warning => summary.warning += 1,
                Assessment::Violation => summary.violation += 1,
                Assessment::Inconclusive => summary.inconclusive += 1,
            }
        }
        if summary.warning > 0 || summary.violation > 0 {
            summary.overall_assessment = OverallAssessment::NeedsAttention;
        }
        summary
    }

    pub fn has_violations(&self) -> bool {
        self.violation > 0
    }
}

/// Complete output of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub protected_attr: String,
    pub groups: Vec<GroupSummary>,
    pub metrics: Vec<MetricResult>,
    pub summary: AnalysisSummary,
}

impl AnalysisResult {
    pub fn new(
        protected_attr: impl Into<String>,
        groups: Vec<GroupSummary>,
        metrics: Vec<MetricResult>,
    ) -> Self {
        let summary = AnalysisSummary::from_results(&metrics);
        Self {
            protected_attr: protected_attr.into(),
            groups,
            metrics,
            summary,
        }
    }

    pub fn metric(&self, name: &str) -> Option<&MetricResult> {
        self.metrics.iter().find(|metric| metric.metric_name == name)
    }
}
