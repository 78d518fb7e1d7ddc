//! Property tests over randomly generated datasets.

use fairness_engine::{analyze, compare};
use fairness_model::{Change, Dataset};
use proptest::prelude::*;

const GROUPS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

/// `(group, shortlisted, actual, predicted, score)`
type Row = (usize, bool, bool, bool, u8);

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (0usize..GROUPS.len(), any::<bool>(), any::<bool>(), any::<bool>(), 0u8..=100),
        1..80,
    )
}

fn flag(value: bool) -> String {
    let text = if value { "1" } else { "0" };
    text.to_string()
}

fn build(rows: &[Row], label: impl Fn(usize) -> String) -> Dataset {
    let records = rows
        .iter()
        .map(|(group, shortlisted, actual, predicted, score)| {
            vec![
                label(*group),
                flag(*shortlisted),
                flag(*actual),
                flag(*predicted),
                score.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    Dataset::from_records(
        ["group", "shortlisted", "actual", "predicted", "score"],
        records,
    )
}

fn dataset(rows: &[Row]) -> Dataset {
    build(rows, |group| GROUPS[group].to_string())
}

proptest! {
    #[test]
    fn defined_rates_lie_in_unit_interval(rows in rows_strategy()) {
        let result = analyze(&dataset(&rows), "group").expect("analyze");
        for metric in &result.metrics {
            let values = metric.values.defined();
            if metric.metric_name == "theil_index" {
                prop_assert!(values.iter().all(|v| *v >= 0.0));
                continue;
            }
            for value in values.iter().chain(metric.score.iter()) {
                prop_assert!((0.0..=1.0).contains(value), "{} = {}", metric.metric_name, value);
            }
        }
    }

    #[test]
    fn groups_partition_rows(rows in rows_strategy()) {
        let result = analyze(&dataset(&rows), "group").expect("analyze");
        let total: u64 = result.groups.iter().map(|g| g.total).sum();
        prop_assert_eq!(total, rows.len() as u64);
        prop_assert!(result.groups.iter().all(|g| g.total > 0));
    }

    #[test]
    fn analysis_is_deterministic(rows in rows_strategy()) {
        let ds = dataset(&rows);
        let first = analyze(&ds, "group").expect("analyze");
        let second = analyze(&ds, "group").expect("analyze");
        prop_assert_eq!(
            serde_json::to_string(&first).expect("serialize"),
            serde_json::to_string(&second).expect("serialize")
        );
    }

    #[test]
    fn self_comparison_is_unchanged(rows in rows_strategy()) {
        let ds = dataset(&rows);
        let result = compare(&ds, &ds, "group").expect("compare");
        prop_assert_eq!(result.summary.improved, 0);
        prop_assert_eq!(result.summary.worsened, 0);
        prop_assert!(result.metrics_comparison.iter().all(|e| e.change == Change::Unchanged));
    }

    #[test]
    fn disparate_impact_ignores_group_labels(rows in rows_strategy()) {
        let original = analyze(&dataset(&rows), "group").expect("analyze");
        let relabeled = build(&rows, |group| format!("g{}", GROUPS.len() - group));
        let relabeled = analyze(&relabeled, "group").expect("analyze");

        let a = original.metric("disparate_impact").expect("di");
        let b = relabeled.metric("disparate_impact").expect("di");
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.fairness_assessment, b.fairness_assessment);
    }
}
