//! Run the full metric pipeline over one dataset.

use tracing::{debug, info_span};

use fairness_catalog::{MetricId, MetricSpec, list_metric_specs};
use fairness_model::{AnalysisOptions, AnalysisResult, Dataset, FairnessError, MetricResult, Result};

use crate::aggregate::{AggregatedGroups, GroupStatsAggregator};
use crate::classify::classify;
use crate::explain::explain;
use crate::metrics::evaluate;

/// Analyze `dataset` across the groups of `protected_attr` with default options.
pub fn analyze(dataset: &Dataset, protected_attr: &str) -> Result<AnalysisResult> {
    analyze_with_options(dataset, protected_attr, &AnalysisOptions::default())
}

/// Analyze `dataset` across the groups of `protected_attr`.
///
/// Metrics whose required columns the dataset cannot supply are left out of
/// the result and out of the summary totals. When `options.metrics` names
/// metrics, only those run, still in catalog order.
pub fn analyze_with_options(
    dataset: &Dataset,
    protected_attr: &str,
    options: &AnalysisOptions,
) -> Result<AnalysisResult> {
    let span = info_span!("analyze", protected_attr = %protected_attr, rows = dataset.len());
    let _guard = span.enter();

    let selected = selected_metrics(options)?;
    let aggregated = GroupStatsAggregator::new(options).aggregate(dataset, protected_attr)?;
    let metrics = list_metric_specs()
        .iter()
        .filter(|spec| selected.as_ref().is_none_or(|ids| ids.contains(&spec.id)))
        .filter_map(|spec| run_metric(spec, &aggregated, options))
        .collect();

    let result = AnalysisResult::new(protected_attr, aggregated.summaries(), metrics);
    debug!(
        total = result.summary.total_metrics,
        fair = result.summary.fair,
        warning = result.summary.warning,
        violation = result.summary.violation,
        inconclusive = result.summary.inconclusive,
        "analysis complete"
    );
    Ok(result)
}

/// Metric ids named in `options`, or `None` when every metric runs.
fn selected_metrics(options: &AnalysisOptions) -> Result<Option<Vec<MetricId>>> {
    if options.metrics.is_empty() {
        return Ok(None);
    }
    options
        .metrics
        .iter()
        .map(|name| {
            name.parse::<MetricId>()
                .map_err(|_| FairnessError::UnknownMetric { name: name.clone() })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn run_metric(
    spec: &MetricSpec,
    aggregated: &AggregatedGroups,
    options: &AnalysisOptions,
) -> Option<MetricResult> {
    if !aggregated.capabilities.satisfies(spec.required_columns) {
        debug!(metric = spec.name(), "skipped: required columns unavailable");
        return None;
    }

    let evaluation = evaluate(spec, aggregated, options);
    let assessment = classify(spec.policy, evaluation.score);
    debug!(
        metric = spec.name(),
        score = ?evaluation.score,
        assessment = %assessment,
        "metric evaluated"
    );

    Some(MetricResult {
        metric_name: spec.name().to_string(),
        values: evaluation.values,
        score: evaluation.score,
        visualization_data: evaluation.visualization_data,
        fairness_assessment: assessment,
        explanation: explain(spec, assessment),
    })
}
