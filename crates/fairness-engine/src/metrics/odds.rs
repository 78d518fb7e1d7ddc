//! Metrics combining true and false positive rates.

use std::collections::BTreeMap;

use fairness_model::{GroupKey, GroupStats, OddsPoint};

use super::rates::{
    defined_range, false_positive_rate, per_group_confusion, true_positive_rate,
};

/// True/false positive rate of every group.
pub fn odds_points(groups: &BTreeMap<GroupKey, GroupStats>) -> BTreeMap<GroupKey, OddsPoint> {
    let tpr = per_group_confusion(groups, true_positive_rate);
    let fpr = per_group_confusion(groups, false_positive_rate);
    groups
        .keys()
        .map(|key| {
            let point = OddsPoint {
                tpr: tpr.get(key).copied().flatten(),
                fpr: fpr.get(key).copied().flatten(),
            };
            (key.clone(), point)
        })
        .collect()
}

/// Larger of the TPR range and the FPR range.
///
/// Each range only spans groups where that rate is defined; a rate defined
/// for fewer than two groups drops out.
pub fn equalized_odds(points: &BTreeMap<GroupKey, OddsPoint>) -> Option<f64> {
    let tpr: Vec<Option<f64>> = points.values().map(|point| point.tpr).collect();
    let fpr: Vec<Option<f64>> = points.values().map(|point| point.fpr).collect();
    match (defined_range(&tpr), defined_range(&fpr)) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Worst pairwise `(|dTPR| + |dFPR|) / 2` over groups with both rates defined.
pub fn average_odds_difference(points: &BTreeMap<GroupKey, OddsPoint>) -> Option<f64> {
    let complete: Vec<(f64, f64)> = points
        .values()
        .filter_map(|point| Some((point.tpr?, point.fpr?)))
        .collect();

    let mut worst: Option<f64> = None;
    for (idx, (tpr_a, fpr_a)) in complete.iter().enumerate() {
        for (tpr_b, fpr_b) in &complete[idx + 1..] {
            let diff = ((tpr_a - tpr_b).abs() + (fpr_a - fpr_b).abs()) / 2.0;
            worst = Some(worst.map_or(diff, |current| current.max(diff)));
        }
    }
    worst
}
