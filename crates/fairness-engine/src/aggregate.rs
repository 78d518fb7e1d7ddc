//! Partition dataset rows into protected-attribute groups.

use std::collections::BTreeMap;

use fairness_model::{
    ACTUAL_COLUMN, AnalysisOptions, CellValue, Dataset, DatasetCapabilities, FairnessError,
    GroupKey, GroupStats, GroupSummary, PREDICTED_COLUMN, Result, SCORE_COLUMN,
    SHORTLISTED_COLUMN, ScoredOutcome, parse_binary, parse_number,
};

/// Per-group statistics plus the capabilities they were computed under.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedGroups {
    pub groups: BTreeMap<GroupKey, GroupStats>,
    pub capabilities: DatasetCapabilities,
}

impl AggregatedGroups {
    /// Row counts per group, in output order.
    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .map(|(group, stats)| GroupSummary {
                group: group.clone(),
                total: stats.total,
                selected: stats.selected,
            })
            .collect()
    }
}

/// Column positions resolved once per aggregation.
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    attribute: usize,
    shortlisted: usize,
    outcomes: Option<(usize, usize)>,
    score: Option<usize>,
}

/// Builds [`GroupStats`] for every observed value of a protected attribute.
#[derive(Debug, Clone, Copy)]
pub struct GroupStatsAggregator<'a> {
    options: &'a AnalysisOptions,
}

impl<'a> GroupStatsAggregator<'a> {
    pub fn new(options: &'a AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn aggregate(&self, dataset: &Dataset, protected_attr: &str) -> Result<AggregatedGroups> {
        let attribute = dataset
            .column_index(protected_attr)
            .ok_or_else(|| FairnessError::missing_column(protected_attr))?;
        let shortlisted = dataset
            .column_index(SHORTLISTED_COLUMN)
            .ok_or_else(|| FairnessError::missing_column(SHORTLISTED_COLUMN))?;
        if dataset.is_empty() {
            return Err(FairnessError::EmptyDataset);
        }

        let capabilities = detect_capabilities(dataset)?;
        let indexes = ColumnIndexes {
            attribute,
            shortlisted,
            outcomes: if capabilities.has_outcomes {
                dataset
                    .column_index(ACTUAL_COLUMN)
                    .zip(dataset.column_index(PREDICTED_COLUMN))
            } else {
                None
            },
            score: if capabilities.has_scores {
                dataset.column_index(SCORE_COLUMN)
            } else {
                None
            },
        };

        let mut groups: BTreeMap<GroupKey, GroupStats> = BTreeMap::new();
        for (row_idx, row) in dataset.rows().iter().enumerate() {
            let key = match cell(row, indexes.attribute) {
                CellValue::Text(value) => GroupKey::new(value.as_str()),
                CellValue::Missing => GroupKey::new(self.options.missing_group_label.as_str()),
            };
            let selected = required_binary(row, indexes.shortlisted, SHORTLISTED_COLUMN, row_idx)?;

            let stats = groups
                .entry(key)
                .or_insert_with(|| GroupStats::new(capabilities));
            stats.total += 1;
            if selected {
                stats.selected += 1;
            }

            let mut actual_outcome = None;
            if let Some((actual_idx, predicted_idx)) = indexes.outcomes {
                let actual = required_binary(row, actual_idx, ACTUAL_COLUMN, row_idx)?;
                let predicted = required_binary(row, predicted_idx, PREDICTED_COLUMN, row_idx)?;
                if let Some(confusion) = stats.confusion.as_mut() {
                    confusion.record(actual, predicted);
                }
                actual_outcome = Some(actual);
            }

            if let Some(score_idx) = indexes.score
                && let Some(score) = cell(row, score_idx).as_text().and_then(parse_number)
            {
                stats.scores.push(ScoredOutcome {
                    score,
                    positive: actual_outcome.unwrap_or(selected),
                });
            }
        }

        tracing::debug!(
            groups = groups.len(),
            has_outcomes = capabilities.has_outcomes,
            has_scores = capabilities.has_scores,
            "aggregated group statistics"
        );

        Ok(AggregatedGroups {
            groups,
            capabilities,
        })
    }
}

/// Decide once which optional columns this dataset can support.
///
/// Outcome columns count only when both exist and every row holds a value;
/// a non-empty value that is not a binary flag is an error.
pub fn detect_capabilities(dataset: &Dataset) -> Result<DatasetCapabilities> {
    let has_outcomes = match (
        dataset.column_index(ACTUAL_COLUMN),
        dataset.column_index(PREDICTED_COLUMN),
    ) {
        (Some(actual), Some(predicted)) => {
            let mut complete = true;
            for (column, idx) in [(ACTUAL_COLUMN, actual), (PREDICTED_COLUMN, predicted)] {
                for (row_idx, cell) in dataset.column_values(idx).enumerate() {
                    match cell {
                        CellValue::Missing => complete = false,
                        CellValue::Text(value) if parse_binary(value).is_none() => {
                            return Err(invalid_value(column, row_idx, value));
                        }
                        CellValue::Text(_) => {}
                    }
                }
            }
            complete
        }
        _ => false,
    };

    let has_scores = dataset.column_index(SCORE_COLUMN).is_some_and(|idx| {
        dataset
            .column_values(idx)
            .any(|cell| cell.as_text().and_then(parse_number).is_some())
    });

    Ok(DatasetCapabilities {
        has_outcomes,
        has_scores,
    })
}

fn cell(row: &[CellValue], idx: usize) -> &CellValue {
    row.get(idx).unwrap_or(&CellValue::Missing)
}

fn required_binary(row: &[CellValue], idx: usize, column: &str, row_idx: usize) -> Result<bool> {
    match cell(row, idx) {
        CellValue::Text(value) => {
            parse_binary(value).ok_or_else(|| invalid_value(column, row_idx, value))
        }
        CellValue::Missing => Err(invalid_value(column, row_idx, "")),
    }
}

/// Rows are reported 1-based, not counting the header.
fn invalid_value(column: &str, row_idx: usize, value: &str) -> FairnessError {
    FairnessError::InvalidValue {
        column: column.to_string(),
        row: row_idx + 1,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(dataset: &Dataset, attr: &str) -> Result<AggregatedGroups> {
        GroupStatsAggregator::new(&AnalysisOptions::default()).aggregate(dataset, attr)
    }

    #[test]
    fn groups_partition_rows() {
        let ds = Dataset::from_records(
            ["gender", "shortlisted"],
            vec![
                vec!["M", "1"],
                vec!["F", "0"],
                vec!["M", "0"],
                vec!["", "1"],
            ],
        );
        let agg = aggregate(&ds, "gender").expect("aggregate");
        let keys: Vec<&str> = agg.groups.keys().map(GroupKey::as_str).collect();
        assert_eq!(keys, vec!["F", "M", "Unknown"]);
        assert_eq!(agg.groups[&GroupKey::new("M")].total, 2);
        assert_eq!(agg.groups[&GroupKey::new("M")].selected, 1);
        let total: u64 = agg.groups.values().map(|s| s.total).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn missing_columns_are_fatal() {
        let ds = Dataset::from_records(["gender"], vec![vec!["M"]]);
        assert_eq!(
            aggregate(&ds, "gender"),
            Err(FairnessError::missing_column("shortlisted"))
        );
        assert_eq!(
            aggregate(&ds, "age_group"),
            Err(FairnessError::missing_column("age_group"))
        );
    }

    #[test]
    fn empty_dataset_is_fatal() {
        let ds = Dataset::from_records(["gender", "shortlisted"], Vec::<Vec<&str>>::new());
        assert_eq!(aggregate(&ds, "gender"), Err(FairnessError::EmptyDataset));
    }

    #[test]
    fn invalid_shortlisted_reports_row() {
        let ds = Dataset::from_records(
            ["gender", "shortlisted"],
            vec![vec!["M", "1"], vec!["F", "maybe"]],
        );
        assert_eq!(
            aggregate(&ds, "gender"),
            Err(FairnessError::InvalidValue {
                column: "shortlisted".to_string(),
                row: 2,
                value: "maybe".to_string(),
            })
        );
    }

    #[test]
    fn blank_outcome_drops_capability_for_every_row() {
        let ds = Dataset::from_records(
            ["gender", "shortlisted", "actual", "predicted"],
            vec![vec!["M", "1", "1", "1"], vec!["F", "0", "", "0"]],
        );
        let agg = aggregate(&ds, "gender").expect("aggregate");
        assert!(!agg.capabilities.has_outcomes);
        assert!(agg.groups.values().all(|stats| stats.confusion.is_none()));
    }

    #[test]
    fn confusion_counts_cover_every_row() {
        let ds = Dataset::from_records(
            ["gender", "shortlisted", "actual", "predicted"],
            vec![
                vec!["M", "1", "1", "1"],
                vec!["M", "0", "1", "0"],
                vec!["M", "1", "0", "1"],
            ],
        );
        let agg = aggregate(&ds, "gender").expect("aggregate");
        let stats = &agg.groups[&GroupKey::new("M")];
        let confusion = stats.confusion.expect("confusion");
        assert_eq!(confusion.total(), stats.total);
        assert_eq!(confusion.true_positive, 1);
        assert_eq!(confusion.false_negative, 1);
        assert_eq!(confusion.false_positive, 1);
    }

    #[test]
    fn scores_use_selection_without_outcomes() {
        let ds = Dataset::from_records(
            ["gender", "shortlisted", "score"],
            vec![vec!["M", "1", "80"], vec!["M", "0", "n/a"]],
        );
        let agg = aggregate(&ds, "gender").expect("aggregate");
        assert!(agg.capabilities.has_scores);
        let scores = &agg.groups[&GroupKey::new("M")].scores;
        assert_eq!(
            scores,
            &vec![ScoredOutcome {
                score: 80.0,
                positive: true
            }]
        );
    }
}
