#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use fairness_model::{Assessment, InputColumn, VisualizationType};

/// Identifier of a catalog metric, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    DemographicParity,
    DisparateImpact,
    EqualOpportunity,
    PredictiveEquality,
    CalibrationByGroup,
    FalseNegativeRateParity,
    FalseDiscoveryRateParity,
    AccuracyEquality,
    PredictiveParityPpv,
    EqualizedOdds,
    StatisticalParityDifference,
    AverageOddsDifference,
    TheilIndex,
}

impl MetricId {
    pub const ALL: [MetricId; 13] = [
        MetricId::DemographicParity,
        MetricId::DisparateImpact,
        MetricId::EqualOpportunity,
        MetricId::PredictiveEquality,
        MetricId::CalibrationByGroup,
        MetricId::FalseNegativeRateParity,
        MetricId::FalseDiscoveryRateParity,
        MetricId::AccuracyEquality,
        MetricId::PredictiveParityPpv,
        MetricId::EqualizedOdds,
        MetricId::StatisticalParityDifference,
        MetricId::AverageOddsDifference,
        MetricId::TheilIndex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::DemographicParity => "demographic_parity",
            MetricId::DisparateImpact => "disparate_impact",
            MetricId::EqualOpportunity => "equal_opportunity",
            MetricId::PredictiveEquality => "predictive_equality",
            MetricId::CalibrationByGroup => "calibration_by_group",
            MetricId::FalseNegativeRateParity => "false_negative_rate_parity",
            MetricId::FalseDiscoveryRateParity => "false_discovery_rate_parity",
            MetricId::AccuracyEquality => "accuracy_equality",
            MetricId::PredictiveParityPpv => "predictive_parity_ppv",
            MetricId::EqualizedOdds => "equalized_odds",
            MetricId::StatisticalParityDifference => "statistical_parity_difference",
            MetricId::AverageOddsDifference => "average_odds_difference",
            MetricId::TheilIndex => "theil_index",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        MetricId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| format!("Unknown metric: {s}"))
    }
}

/// How a metric's score maps onto Fair/Warning/Violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentPolicy {
    /// Higher is fairer; compared against the four-fifths thresholds.
    Ratio,
    /// Closer to zero is fairer; the absolute value is compared.
    Difference,
}

/// Short label describing the value band of each assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentLabels {
    pub fair: &'static str,
    pub warning: &'static str,
    pub violation: &'static str,
}

impl SegmentLabels {
    pub fn label(&self, assessment: Assessment) -> Option<&'static str> {
        match assessment {
            Assessment::Fair => Some(self.fair),
            Assessment::Warning => Some(self.warning),
            Assessment::Violation => Some(self.violation),
            Assessment::Inconclusive => None,
        }
    }
}

/// Remediation text attached to metrics that need attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub what_this_means: &'static str,
    /// Problem statement for a Violation.
    pub what_is_wrong: &'static str,
    /// Problem statement for a Warning.
    pub watch_what_is_wrong: &'static str,
    pub root_causes: &'static [&'static str],
    pub recruiter_actions: &'static [&'static str],
    /// Dashboard text for a Violation.
    pub dashboard_recommendation: &'static str,
    /// Dashboard text for a Warning.
    pub watch_recommendation: &'static str,
}

/// Dynamic explanation text chosen for one `(metric, assessment)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplanationTemplate {
    pub what_this_means: &'static str,
    pub what_is_wrong: &'static str,
    pub root_causes: &'static [&'static str],
    pub recruiter_actions: &'static [&'static str],
    pub dashboard_recommendation: &'static str,
}

/// Immutable catalog entry describing one fairness metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSpec {
    pub id: MetricId,
    pub display_name: &'static str,
    pub definition: &'static str,
    pub interpretation: &'static str,
    pub context: &'static str,
    pub required_columns: &'static [InputColumn],
    pub visualization_type: VisualizationType,
    pub policy: AssessmentPolicy,
    pub segments: SegmentLabels,
    pub guidance: Guidance,
}

impl MetricSpec {
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// Dynamic text for an assessment; `None` unless Warning or Violation.
    pub fn template(&self, assessment: Assessment) -> Option<ExplanationTemplate> {
        let guidance = &self.guidance;
        let (what_is_wrong, dashboard_recommendation) = match assessment {
            Assessment::Violation => (guidance.what_is_wrong, guidance.dashboard_recommendation),
            Assessment::Warning => (guidance.watch_what_is_wrong, guidance.watch_recommendation),
            Assessment::Fair | Assessment::Inconclusive => return None,
        };
        Some(ExplanationTemplate {
            what_this_means: guidance.what_this_means,
            what_is_wrong,
            root_causes: guidance.root_causes,
            recruiter_actions: guidance.recruiter_actions,
            dashboard_recommendation,
        })
    }
}
