//! Observed positive rate per score quantile bin.

use std::collections::BTreeMap;

use fairness_model::{GroupKey, GroupStats};

use super::rates::{defined_range, ratio};

/// Score bins shared by every group.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBins {
    /// Ascending, distinct bin edges. A single edge means one degenerate bin.
    edges: Vec<f64>,
}

impl ScoreBins {
    /// Quantile bins over `scores`, dropping duplicate edges.
    ///
    /// Quantiles interpolate linearly between order statistics. Returns
    /// `None` when there are no scores.
    pub fn quantiles(scores: &[f64], bins: usize) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);

        let bins = bins.max(1);
        let mut edges: Vec<f64> = (0..=bins)
            .map(|i| quantile(&sorted, i as f64 / bins as f64))
            .collect();
        edges.dedup();
        Some(Self { edges })
    }

    /// Number of bins; at least one.
    pub fn count(&self) -> usize {
        self.edges.len().saturating_sub(1).max(1)
    }

    /// Index of the bin holding `score`; the first bin is closed on the left.
    pub fn bin_of(&self, score: f64) -> usize {
        self.edges[1..]
            .partition_point(|edge| *edge < score)
            .min(self.count() - 1)
    }

    /// Interval labels with two decimals: `[lo, hi]` first, `(lo, hi]` after.
    pub fn labels(&self) -> Vec<String> {
        if self.edges.len() == 1 {
            let edge = self.edges[0];
            return vec![format!("[{edge:.2}, {edge:.2}]")];
        }
        self.edges
            .windows(2)
            .enumerate()
            .map(|(idx, pair)| {
                let open = if idx == 0 { '[' } else { '(' };
                format!("{open}{:.2}, {:.2}]", pair[0], pair[1])
            })
            .collect()
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Calibration curves for every group.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub labels: Vec<String>,
    pub series: BTreeMap<GroupKey, Vec<Option<f64>>>,
    /// Largest per-bin gap between groups.
    pub max_gap: Option<f64>,
}

pub fn calibration_by_group(
    groups: &BTreeMap<GroupKey, GroupStats>,
    bins: usize,
) -> Option<Calibration> {
    let scores: Vec<f64> = groups
        .values()
        .flat_map(|stats| stats.scores.iter().map(|scored| scored.score))
        .collect();
    let score_bins = ScoreBins::quantiles(&scores, bins)?;
    let bin_count = score_bins.count();

    let series: BTreeMap<GroupKey, Vec<Option<f64>>> = groups
        .iter()
        .map(|(key, stats)| {
            let mut totals = vec![0u64; bin_count];
            let mut positives = vec![0u64; bin_count];
            for scored in &stats.scores {
                let bin = score_bins.bin_of(scored.score);
                totals[bin] += 1;
                if scored.positive {
                    positives[bin] += 1;
                }
            }
            let rates = totals
                .iter()
                .zip(&positives)
                .map(|(total, positive)| ratio(*positive, *total))
                .collect();
            (key.clone(), rates)
        })
        .collect();

    let max_gap = (0..bin_count)
        .filter_map(|bin| defined_range(series.values().map(|rates| &rates[bin])))
        .reduce(f64::max);

    Some(Calibration {
        labels: score_bins.labels(),
        series,
        max_gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairness_model::ScoredOutcome;

    fn scored(values: &[(f64, bool)]) -> GroupStats {
        GroupStats {
            total: values.len() as u64,
            scores: values
                .iter()
                .map(|(score, positive)| ScoredOutcome {
                    score: *score,
                    positive: *positive,
                })
                .collect(),
            ..GroupStats::default()
        }
    }

    #[test]
    fn quartile_edges_and_labels() {
        let bins = ScoreBins::quantiles(&[0.0, 25.0, 50.0, 75.0, 100.0], 4).expect("bins");
        assert_eq!(bins.count(), 4);
        assert_eq!(
            bins.labels(),
            vec!["[0.00, 25.00]", "(25.00, 50.00]", "(50.00, 75.00]", "(75.00, 100.00]"]
        );
        assert_eq!(bins.bin_of(0.0), 0);
        assert_eq!(bins.bin_of(25.0), 0);
        assert_eq!(bins.bin_of(25.5), 1);
        assert_eq!(bins.bin_of(100.0), 3);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let bins = ScoreBins::quantiles(&[10.0, 10.0, 10.0, 90.0], 4).expect("bins");
        assert_eq!(bins.labels(), vec!["[10.00, 30.00]", "(30.00, 90.00]"]);
        assert_eq!(bins.bin_of(10.0), 0);
        assert_eq!(bins.bin_of(31.0), 1);

        let single = ScoreBins::quantiles(&[5.0, 5.0], 10).expect("bins");
        assert_eq!(single.count(), 1);
        assert_eq!(single.bin_of(5.0), 0);
        assert_eq!(single.labels(), vec!["[5.00, 5.00]"]);
    }

    #[test]
    fn per_bin_rates_and_gap() {
        let mut groups = BTreeMap::new();
        groups.insert(
            GroupKey::new("A"),
            scored(&[(10.0, false), (20.0, false), (80.0, true), (90.0, true)]),
        );
        groups.insert(
            GroupKey::new("B"),
            scored(&[(15.0, false), (25.0, true), (85.0, false), (95.0, true)]),
        );
        let calibration = calibration_by_group(&groups, 2).expect("calibration");
        assert_eq!(calibration.labels.len(), 2);
        assert_eq!(calibration.series[&GroupKey::new("A")], vec![Some(0.0), Some(1.0)]);
        assert_eq!(calibration.series[&GroupKey::new("B")], vec![Some(0.5), Some(0.5)]);
        assert_eq!(calibration.max_gap, Some(0.5));
    }

    #[test]
    fn group_without_scores_in_bin_is_undefined() {
        let mut groups = BTreeMap::new();
        groups.insert(GroupKey::new("A"), scored(&[(10.0, true), (90.0, true), (95.0, true)]));
        groups.insert(GroupKey::new("B"), scored(&[(95.0, false)]));
        let calibration = calibration_by_group(&groups, 2).expect("calibration");
        assert_eq!(calibration.series[&GroupKey::new("B")], vec![None, Some(0.0)]);
        assert_eq!(calibration.max_gap, Some(1.0));
    }

    #[test]
    fn no_scores_means_no_calibration() {
        let mut groups = BTreeMap::new();
        groups.insert(GroupKey::new("A"), scored(&[]));
        assert_eq!(calibration_by_group(&groups, 10), None);
    }
}
