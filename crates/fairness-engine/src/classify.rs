//! Map metric scores onto assessments.

use fairness_catalog::AssessmentPolicy;
use fairness_catalog::thresholds::{
    DIFFERENCE_FAIR_MAX, DIFFERENCE_WARNING_MAX, RATIO_FAIR_MIN, RATIO_WARNING_MIN,
    THRESHOLD_TOLERANCE,
};
use fairness_model::Assessment;

/// Classify a score under a policy; an undefined score is inconclusive.
///
/// A score within [`THRESHOLD_TOLERANCE`] of a threshold is treated as
/// equal to it.
pub fn classify(policy: AssessmentPolicy, score: Option<f64>) -> Assessment {
    let Some(score) = score else {
        return Assessment::Inconclusive;
    };
    match policy {
        AssessmentPolicy::Ratio => {
            if score >= RATIO_FAIR_MIN - THRESHOLD_TOLERANCE {
                Assessment::Fair
            } else if score >= RATIO_WARNING_MIN - THRESHOLD_TOLERANCE {
                Assessment::Warning
            } else {
                Assessment::Violation
            }
        }
        AssessmentPolicy::Difference => {
            let diff = score.abs();
            if diff < DIFFERENCE_FAIR_MAX - THRESHOLD_TOLERANCE {
                Assessment::Fair
            } else if diff < DIFFERENCE_WARNING_MAX - THRESHOLD_TOLERANCE {
                Assessment::Warning
            } else {
                Assessment::Violation
            }
        }
    }
}

/// Signed movement of `candidate` relative to `baseline` toward fairness.
///
/// Positive means the candidate is fairer.
pub fn fairness_gain(policy: AssessmentPolicy, baseline: f64, candidate: f64) -> f64 {
    match policy {
        AssessmentPolicy::Ratio => candidate - baseline,
        AssessmentPolicy::Difference => baseline.abs() - candidate.abs(),
    }
}
