//! Diff two analyses metric by metric.

use tracing::{debug, info_span};

use fairness_catalog::{AssessmentPolicy, list_metric_specs};
use fairness_model::{
    AnalysisOptions, AnalysisResult, Change, ComparisonResult, Dataset, FairnessError,
    MetricComparison, MetricResult, Result,
};

use crate::analyze::analyze_with_options;
use crate::classify::fairness_gain;

/// Analyze both datasets with default options and compare the results.
pub fn compare(
    baseline: &Dataset,
    candidate: &Dataset,
    protected_attr: &str,
) -> Result<ComparisonResult> {
    compare_with_options(baseline, candidate, protected_attr, &AnalysisOptions::default())
}

/// Analyze both datasets and compare the results.
///
/// Both datasets must carry `protected_attr`.
pub fn compare_with_options(
    baseline: &Dataset,
    candidate: &Dataset,
    protected_attr: &str,
    options: &AnalysisOptions,
) -> Result<ComparisonResult> {
    let span = info_span!("compare", protected_attr = %protected_attr);
    let _guard = span.enter();

    for (side, dataset) in [("baseline", baseline), ("candidate", candidate)] {
        if !dataset.has_column(protected_attr) {
            return Err(FairnessError::attribute_mismatch(format!(
                "{side} dataset has no column {protected_attr}"
            )));
        }
    }

    let before = analyze_with_options(baseline, protected_attr, options)?;
    let after = analyze_with_options(candidate, protected_attr, options)?;
    compare_results(&before, &after, options)
}

/// Compare two analyses of the same protected attribute.
///
/// Entries follow catalog order; a metric missing from either side is left out.
pub fn compare_results(
    baseline: &AnalysisResult,
    candidate: &AnalysisResult,
    options: &AnalysisOptions,
) -> Result<ComparisonResult> {
    if !baseline
        .protected_attr
        .trim()
        .eq_ignore_ascii_case(candidate.protected_attr.trim())
    {
        return Err(FairnessError::attribute_mismatch(format!(
            "baseline uses {}, candidate uses {}",
            baseline.protected_attr, candidate.protected_attr
        )));
    }

    let mut entries = Vec::new();
    for spec in list_metric_specs() {
        let (Some(before), Some(after)) =
            (baseline.metric(spec.name()), candidate.metric(spec.name()))
        else {
            continue;
        };
        let change = classify_change(spec.policy, before, after, options.comparison_epsilon);
        debug!(metric = spec.name(), change = change.as_str(), "metric compared");
        entries.push(MetricComparison {
            metric_name: spec.name().to_string(),
            display_name: spec.display_name.to_string(),
            baseline: before.clone(),
            candidate: after.clone(),
            change,
        });
    }

    Ok(ComparisonResult::new(baseline.protected_attr.clone(), entries))
}

/// Direction of change from `baseline` to `candidate` for one metric.
///
/// A better assessment wins outright. Equal assessments fall back to score
/// movement beyond `epsilon`. Inconclusive on either side is never a change.
pub fn classify_change(
    policy: AssessmentPolicy,
    baseline: &MetricResult,
    candidate: &MetricResult,
    epsilon: f64,
) -> Change {
    let (Some(before), Some(after)) = (
        baseline.fairness_assessment.rank(),
        candidate.fairness_assessment.rank(),
    ) else {
        return Change::Unchanged;
    };

    match after.cmp(&before) {
        std::cmp::Ordering::Greater => Change::Improved,
        std::cmp::Ordering::Less => Change::Worsened,
        std::cmp::Ordering::Equal => match (baseline.score, candidate.score) {
            (Some(old), Some(new)) => {
                let gain = fairness_gain(policy, old, new);
                if gain > epsilon {
                    Change::Improved
                } else if gain < -epsilon {
                    Change::Worsened
                } else {
                    Change::Unchanged
                }
            }
            _ => Change::Unchanged,
        },
    }
}
