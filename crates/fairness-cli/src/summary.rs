use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fairness_catalog::thresholds::{DIFFERENCE_FAIR_MAX, RATIO_FAIR_MIN};
use fairness_catalog::{AssessmentPolicy, MetricSpec, find_spec};
use fairness_cli::report::{AnalysisReport, ComparisonReport, InspectionReport};
use fairness_ingest::{ColumnStatistics, NumericSummary};
use fairness_model::{
    Assessment, Change, GroupSummary, MetricResult, MetricValues, OverallAssessment,
    OverallChange,
};

pub fn print_analysis(report: &AnalysisReport) {
    let result = &report.result;
    println!(
        "Dataset: {} ({} rows, id {})",
        report.dataset.filename,
        report.dataset.rows,
        short_id(report.dataset.dataset_id.as_str())
    );
    println!("Protected attribute: {}", result.protected_attr);
    println!("{}", group_table(&result.groups));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Values"),
        header_cell("Score"),
        header_cell("Assessment"),
        header_cell("Segment"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for metric in &result.metrics {
        table.add_row(vec![
            metric_cell(metric),
            Cell::new(format_values(&metric.values)),
            score_cell(metric.score),
            assessment_cell(metric.fairness_assessment),
            metric
                .explanation
                .current_segment
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");

    let summary = &result.summary;
    println!(
        "Summary: {} metrics, {} fair, {} warning, {} violation, {} inconclusive",
        summary.total_metrics,
        summary.fair,
        summary.warning,
        summary.violation,
        summary.inconclusive
    );
    println!("Overall: {}", overall_label(summary.overall_assessment));
    print_recommendations(&result.metrics);
}

pub fn print_comparison(report: &ComparisonReport) {
    let result = &report.result;
    println!(
        "Baseline: {} ({} rows)",
        report.baseline.filename, report.baseline.rows
    );
    println!(
        "Candidate: {} ({} rows)",
        report.candidate.filename, report.candidate.rows
    );
    println!("Protected attribute: {}", result.protected_attr);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Baseline"),
        header_cell("Candidate"),
        header_cell("Baseline score"),
        header_cell("Candidate score"),
        header_cell("Change"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for entry in &result.metrics_comparison {
        table.add_row(vec![
            Cell::new(&entry.display_name).add_attribute(Attribute::Bold),
            assessment_cell(entry.baseline.fairness_assessment),
            assessment_cell(entry.candidate.fairness_assessment),
            score_cell(entry.baseline.score),
            score_cell(entry.candidate.score),
            change_cell(entry.change),
        ]);
    }
    println!("{table}");

    let summary = &result.summary;
    let ratio = summary
        .improvement_ratio
        .map_or_else(|| "-".to_string(), |ratio| format!("{:.0}%", ratio * 100.0));
    println!(
        "Summary: {} metrics, {} improved, {} worsened, {} unchanged ({ratio} improved)",
        summary.total_metrics, summary.improved, summary.worsened, summary.unchanged
    );
    println!("Overall: {}", overall_change_label(summary.overall));
}

pub fn print_catalog(specs: &[MetricSpec]) {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Name", "Requires", "Chart", "Fair when"]);
    apply_table_style(&mut table);
    for spec in specs {
        let requires = spec
            .required_columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(spec.name()).fg(Color::Blue),
            Cell::new(spec.display_name),
            Cell::new(requires),
            Cell::new(spec.visualization_type),
            Cell::new(fair_rule(spec.policy)),
        ]);
    }
    println!("{table}");
}

pub fn print_inspection(report: &InspectionReport) {
    let stats = &report.statistics;
    println!(
        "Dataset: {} ({} rows, {} columns, id {})",
        report.dataset.filename,
        stats.rows,
        stats.columns,
        short_id(report.dataset.dataset_id.as_str())
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Missing"),
        header_cell("Summary"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for name in &report.dataset.column_names {
        let Some(column) = stats.column_stats.get(name) else {
            continue;
        };
        let missing = stats.missing_values.get(name).copied().unwrap_or(0);
        let (kind, summary) = match column {
            ColumnStatistics::Numeric(numeric) => ("numeric", numeric_line(numeric)),
            ColumnStatistics::Categorical(categorical) => {
                let top = categorical
                    .top_values
                    .iter()
                    .map(|entry| format!("{} ({})", entry.value, entry.count))
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    "categorical",
                    format!("{} unique; top: {top}", categorical.unique_values),
                )
            }
        };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            dim_cell(kind),
            Cell::new(missing),
            Cell::new(summary),
        ]);
    }
    println!("{table}");

    if report.preview.is_empty() {
        return;
    }
    let mut preview = Table::new();
    preview.set_header(
        report
            .dataset
            .column_names
            .iter()
            .map(String::as_str)
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut preview);
    for row in &report.preview {
        preview.add_row(
            row.iter()
                .map(|cell| cell.as_deref().map_or_else(|| dim_cell("-"), Cell::new))
                .collect::<Vec<_>>(),
        );
    }
    println!("Preview ({} of {} rows):", report.preview.len(), stats.rows);
    println!("{preview}");
}

fn numeric_line(summary: &NumericSummary) -> String {
    format!(
        "mean {}, median {}, min {}, max {}, std {}",
        format_optional(summary.mean),
        format_optional(summary.median),
        format_optional(summary.min),
        format_optional(summary.max),
        format_optional(summary.std)
    )
}

fn group_table(groups: &[GroupSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Candidates"),
        header_cell("Shortlisted"),
        header_cell("Rate"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for group in groups {
        let rate = if group.total > 0 {
            format_number(group.selected as f64 / group.total as f64)
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(group.group.as_str()).add_attribute(Attribute::Bold),
            Cell::new(group.total),
            Cell::new(group.selected),
            Cell::new(rate),
        ]);
    }
    table
}

/// Dashboard recommendations for every metric that needs attention.
fn print_recommendations(metrics: &[MetricResult]) {
    let flagged: Vec<&MetricResult> = metrics
        .iter()
        .filter(|metric| metric.fairness_assessment.needs_attention())
        .collect();
    if flagged.is_empty() {
        return;
    }
    println!();
    println!("Recommendations:");
    for metric in flagged {
        let Some(recommendation) = &metric.explanation.dashboard_recommendation else {
            continue;
        };
        println!(
            "- {} [{}]: {recommendation}",
            metric.explanation.display_name, metric.fairness_assessment
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Per-group values inline, `n/a` for undefined rates.
fn format_values(values: &MetricValues) -> String {
    match values {
        MetricValues::Scalar(value) => format_optional(*value),
        MetricValues::PerGroup(map) => map
            .iter()
            .map(|(group, value)| format!("{group}: {}", format_optional(*value)))
            .collect::<Vec<_>>()
            .join(", "),
        MetricValues::PerGroupSeries(map) => {
            let bins = map.values().map(Vec::len).max().unwrap_or(0);
            format!("{} groups x {bins} bins", map.len())
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), format_number)
}

fn format_number(value: f64) -> String {
    format!("{value:.3}")
}

fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

fn fair_rule(policy: AssessmentPolicy) -> String {
    match policy {
        AssessmentPolicy::Ratio => format!("ratio >= {RATIO_FAIR_MIN:.2}"),
        AssessmentPolicy::Difference => format!("|gap| <= {DIFFERENCE_FAIR_MAX:.2}"),
    }
}

fn metric_cell(metric: &MetricResult) -> Cell {
    let name = find_spec(&metric.metric_name).map_or(metric.metric_name.as_str(), |spec| {
        spec.display_name
    });
    Cell::new(name).add_attribute(Attribute::Bold)
}

fn score_cell(score: Option<f64>) -> Cell {
    match score {
        Some(value) => Cell::new(format_number(value)),
        None => dim_cell("-"),
    }
}

fn assessment_cell(assessment: Assessment) -> Cell {
    match assessment {
        Assessment::Fair => Cell::new("FAIR").fg(Color::Green),
        Assessment::Warning => Cell::new("WARNING").fg(Color::Yellow),
        Assessment::Violation => Cell::new("VIOLATION")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Assessment::Inconclusive => dim_cell("INCONCLUSIVE"),
    }
}

fn change_cell(change: Change) -> Cell {
    match change {
        Change::Improved => Cell::new("improved").fg(Color::Green),
        Change::Worsened => Cell::new("worsened")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Change::Unchanged => dim_cell("unchanged"),
    }
}

fn overall_label(overall: OverallAssessment) -> &'static str {
    match overall {
        OverallAssessment::Fair => "Fair",
        OverallAssessment::NeedsAttention => "Needs Attention",
    }
}

fn overall_change_label(overall: OverallChange) -> &'static str {
    match overall {
        OverallChange::Improved => "Improved",
        OverallChange::Worsened => "Worsened",
        OverallChange::Similar => "Similar",
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use fairness_model::GroupKey;

    #[test]
    fn per_group_values_render_inline() {
        let mut map = BTreeMap::new();
        map.insert(GroupKey::new("Female"), Some(0.2));
        map.insert(GroupKey::new("Male"), None);
        assert_eq!(
            format_values(&MetricValues::PerGroup(map)),
            "Female: 0.200, Male: n/a"
        );
        assert_eq!(format_values(&MetricValues::Scalar(None)), "n/a");
        assert_eq!(format_values(&MetricValues::Scalar(Some(0.4))), "0.400");
    }

    #[test]
    fn series_values_render_shape() {
        let mut map = BTreeMap::new();
        map.insert(GroupKey::new("A"), vec![Some(0.1), None, Some(1.0)]);
        map.insert(GroupKey::new("B"), vec![None, None, None]);
        assert_eq!(
            format_values(&MetricValues::PerGroupSeries(map)),
            "2 groups x 3 bins"
        );
    }

    #[test]
    fn numeric_line_marks_empty_columns() {
        let summary = NumericSummary {
            mean: Some(75.0),
            median: Some(75.0),
            min: Some(60.0),
            max: Some(90.0),
            std: None,
        };
        assert_eq!(
            numeric_line(&summary),
            "mean 75.000, median 75.000, min 60.000, max 90.000, std n/a"
        );
    }

    #[test]
    fn fair_rule_follows_policy() {
        assert_eq!(fair_rule(AssessmentPolicy::Ratio), "ratio >= 0.80");
        assert_eq!(fair_rule(AssessmentPolicy::Difference), "|gap| <= 0.10");
    }

    #[test]
    fn short_id_truncates_digests() {
        assert_eq!(short_id("0123456789abcdef"), "0123456789ab");
        assert_eq!(short_id("abc"), "abc");
    }
}
