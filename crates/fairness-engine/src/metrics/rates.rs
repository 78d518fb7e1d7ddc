//! Per-group rates and the helpers that combine them.

use std::collections::BTreeMap;

use fairness_model::{ConfusionCounts, GroupKey, GroupStats};

/// `numerator / denominator`, undefined when the denominator is zero.
pub fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

pub fn selection_rate(stats: &GroupStats) -> Option<f64> {
    ratio(stats.selected, stats.total)
}

pub fn true_positive_rate(c: &ConfusionCounts) -> Option<f64> {
    ratio(c.true_positive, c.true_positive + c.false_negative)
}

pub fn false_positive_rate(c: &ConfusionCounts) -> Option<f64> {
    ratio(c.false_positive, c.false_positive + c.true_negative)
}

pub fn false_negative_rate(c: &ConfusionCounts) -> Option<f64> {
    ratio(c.false_negative, c.false_negative + c.true_positive)
}

pub fn false_discovery_rate(c: &ConfusionCounts) -> Option<f64> {
    ratio(c.false_positive, c.false_positive + c.true_positive)
}

pub fn accuracy(c: &ConfusionCounts) -> Option<f64> {
    ratio(c.true_positive + c.true_negative, c.total())
}

pub fn positive_predictive_value(c: &ConfusionCounts) -> Option<f64> {
    ratio(c.true_positive, c.true_positive + c.false_positive)
}

/// Map every group through `rate`.
pub fn per_group<F>(
    groups: &BTreeMap<GroupKey, GroupStats>,
    rate: F,
) -> BTreeMap<GroupKey, Option<f64>>
where
    F: Fn(&GroupStats) -> Option<f64>,
{
    groups
        .iter()
        .map(|(key, stats)| (key.clone(), rate(stats)))
        .collect()
}

/// Map every group's confusion counts through `rate`.
///
/// Groups without confusion counts map to `None`.
pub fn per_group_confusion<F>(
    groups: &BTreeMap<GroupKey, GroupStats>,
    rate: F,
) -> BTreeMap<GroupKey, Option<f64>>
where
    F: Fn(&ConfusionCounts) -> Option<f64>,
{
    per_group(groups, |stats| stats.confusion.as_ref().and_then(&rate))
}

/// Smallest and largest defined value; `None` with fewer than two defined.
pub fn defined_extremes<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a Option<f64>>,
{
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values.into_iter().flatten() {
        count += 1;
        min = min.min(*value);
        max = max.max(*value);
    }
    (count >= 2).then_some((min, max))
}

/// `max - min` over defined values; `None` with fewer than two defined.
pub fn defined_range<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Option<f64>>,
{
    defined_extremes(values).map(|(min, max)| max - min)
}
