//! Selection-rate metrics combined across groups.

use std::collections::BTreeMap;

use fairness_model::{GroupKey, GroupStats};

use super::rates::{defined_extremes, defined_range, per_group, ratio, selection_rate};

/// Lowest selection rate over the highest; undefined when no group selects.
pub fn disparate_impact(groups: &BTreeMap<GroupKey, GroupStats>) -> Option<f64> {
    let rates = per_group(groups, selection_rate);
    let (min, max) = defined_extremes(rates.values())?;
    (max > 0.0).then(|| min / max)
}

/// Highest selection rate minus the lowest.
pub fn statistical_parity_difference(groups: &BTreeMap<GroupKey, GroupStats>) -> Option<f64> {
    defined_range(per_group(groups, selection_rate).values())
}

/// Between-group Theil T index of selection rates, weighted by group size.
///
/// `T = sum_g (n_g / N) * (r_g / mu) * ln(r_g / mu)` where `mu` is the overall
/// selection rate; groups with `r_g = 0` contribute nothing. Undefined for a
/// single group or when nobody is selected.
pub fn theil_index(groups: &BTreeMap<GroupKey, GroupStats>) -> Option<f64> {
    if groups.len() < 2 {
        return None;
    }
    let total: u64 = groups.values().map(|stats| stats.total).sum();
    let selected: u64 = groups.values().map(|stats| stats.selected).sum();
    let mean = ratio(selected, total).filter(|mean| *mean > 0.0)?;

    let index = groups
        .values()
        .filter_map(|stats| {
            let rate = selection_rate(stats)?;
            let weight = stats.total as f64 / total as f64;
            let relative = rate / mean;
            (relative > 0.0).then(|| weight * relative * relative.ln())
        })
        .sum::<f64>();
    // Rounding can leave a tiny negative residue for equal rates.
    Some(index.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(counts: &[(&str, u64, u64)]) -> BTreeMap<GroupKey, GroupStats> {
        counts
            .iter()
            .map(|(name, total, selected)| {
                (
                    GroupKey::new(*name),
                    GroupStats {
                        total: *total,
                        selected: *selected,
                        ..GroupStats::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn disparate_impact_is_min_over_max() {
        let g = groups(&[("Male", 100, 50), ("Female", 100, 20)]);
        let di = disparate_impact(&g).expect("defined");
        assert!((di - 0.4).abs() < 1e-12);
    }

    #[test]
    fn disparate_impact_undefined_without_selection() {
        let g = groups(&[("A", 10, 0), ("B", 5, 0)]);
        assert_eq!(disparate_impact(&g), None);
        assert_eq!(disparate_impact(&groups(&[("A", 10, 3)])), None);
    }

    #[test]
    fn equal_rates_have_zero_difference_and_theil() {
        let g = groups(&[("A", 10, 3), ("B", 20, 6)]);
        let spd = statistical_parity_difference(&g).expect("defined");
        assert!(spd.abs() < 1e-12);
        let theil = theil_index(&g).expect("defined");
        assert!(theil.abs() < 1e-12);
    }

    #[test]
    fn theil_grows_with_inequality() {
        let mild = theil_index(&groups(&[("A", 100, 40), ("B", 100, 30)])).expect("defined");
        let strong = theil_index(&groups(&[("A", 100, 60), ("B", 100, 5)])).expect("defined");
        assert!(mild > 0.0);
        assert!(strong > mild);
        assert_eq!(theil_index(&groups(&[("A", 10, 0), ("B", 10, 0)])), None);
    }
}
