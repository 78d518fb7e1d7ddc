//! Metric evaluators.
//!
//! Each catalog entry maps to one evaluator. Evaluators only read the
//! aggregated group statistics; the caller decides beforehand whether the
//! dataset capabilities allow a metric to run.

pub mod calibration;
pub mod odds;
pub mod parity;
pub mod rates;

use std::collections::BTreeMap;

use fairness_catalog::{MetricId, MetricSpec};
use fairness_model::{AnalysisOptions, GroupKey, MetricValues, VisualizationData};

use crate::aggregate::AggregatedGroups;

/// Raw output of a metric evaluator, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub values: MetricValues,
    /// Scalar the assessment is derived from; `None` when undefined.
    pub score: Option<f64>,
    pub visualization_data: VisualizationData,
}

impl Evaluation {
    fn per_group(values: BTreeMap<GroupKey, Option<f64>>) -> Self {
        let score = rates::defined_range(values.values());
        Self {
            values: MetricValues::PerGroup(values),
            score,
            visualization_data: VisualizationData::Bar,
        }
    }

    fn scalar(score: Option<f64>) -> Self {
        Self {
            values: MetricValues::Scalar(score),
            score,
            visualization_data: VisualizationData::Metric,
        }
    }
}

/// Evaluate one metric against aggregated group statistics.
pub fn evaluate(
    spec: &MetricSpec,
    aggregated: &AggregatedGroups,
    options: &AnalysisOptions,
) -> Evaluation {
    let groups = &aggregated.groups;
    match spec.id {
        MetricId::DemographicParity => {
            Evaluation::per_group(rates::per_group(groups, rates::selection_rate))
        }
        MetricId::DisparateImpact => Evaluation::scalar(parity::disparate_impact(groups)),
        MetricId::EqualOpportunity => Evaluation::per_group(rates::per_group_confusion(
            groups,
            rates::true_positive_rate,
        )),
        MetricId::PredictiveEquality => Evaluation::per_group(rates::per_group_confusion(
            groups,
            rates::false_positive_rate,
        )),
        MetricId::CalibrationByGroup => {
            match calibration::calibration_by_group(groups, options.calibration_bins) {
                Some(calibration) => Evaluation {
                    values: MetricValues::PerGroupSeries(calibration.series),
                    score: calibration.max_gap,
                    visualization_data: VisualizationData::Heatmap {
                        bins: calibration.labels,
                    },
                },
                None => Evaluation {
                    values: MetricValues::PerGroupSeries(BTreeMap::new()),
                    score: None,
                    visualization_data: VisualizationData::Heatmap { bins: Vec::new() },
                },
            }
        }
        MetricId::FalseNegativeRateParity => Evaluation::per_group(rates::per_group_confusion(
            groups,
            rates::false_negative_rate,
        )),
        MetricId::FalseDiscoveryRateParity => Evaluation::per_group(
            rates::per_group_confusion(groups, rates::false_discovery_rate),
        ),
        MetricId::AccuracyEquality => {
            Evaluation::per_group(rates::per_group_confusion(groups, rates::accuracy))
        }
        MetricId::PredictiveParityPpv => Evaluation::per_group(rates::per_group_confusion(
            groups,
            rates::positive_predictive_value,
        )),
        MetricId::EqualizedOdds => {
            let points = odds::odds_points(groups);
            let score = odds::equalized_odds(&points);
            Evaluation {
                values: MetricValues::Scalar(score),
                score,
                visualization_data: VisualizationData::Scatter { points },
            }
        }
        MetricId::StatisticalParityDifference => {
            Evaluation::scalar(parity::statistical_parity_difference(groups))
        }
        MetricId::AverageOddsDifference => {
            Evaluation::scalar(odds::average_odds_difference(&odds::odds_points(groups)))
        }
        MetricId::TheilIndex => Evaluation::scalar(parity::theil_index(groups)),
    }
}
