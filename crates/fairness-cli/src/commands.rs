use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use fairness_catalog::list_metric_specs;
use fairness_cli::config::{OptionOverrides, resolve_options};
use fairness_cli::report::{
    AnalysisReport, ComparisonReport, InspectionReport, to_json, write_report,
};
use fairness_engine::{analyze_with_options, compare_results};
use fairness_ingest::{
    DatasetStatistics, LoadedDataset, load_csv_dataset, preview_rows, validate_protected_attribute,
};
use fairness_model::{AnalysisOptions, AnalysisResult};

use crate::cli::{AnalyzeArgs, CompareArgs, InspectArgs, OutputFormatArg};
use crate::summary::{print_analysis, print_catalog, print_comparison, print_inspection};

pub fn run_metrics() -> Result<()> {
    print_catalog(list_metric_specs());
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs, config: Option<&Path>) -> Result<AnalysisReport> {
    let options = resolve_options(
        config,
        OptionOverrides {
            calibration_bins: args.calibration_bins,
            metrics: args.metrics.clone(),
        },
    )?;
    let loaded = load_for_attribute(&args.dataset, &args.attr)?;
    let result = analyze_with_options(&loaded.dataset, &args.attr, &options)
        .with_context(|| format!("analyze {}", args.dataset.display()))?;
    info!(
        dataset_id = %loaded.metadata.dataset_id,
        metrics = result.summary.total_metrics,
        violations = result.summary.violation,
        "analysis complete"
    );

    let report = AnalysisReport::new(loaded.metadata, result);
    if let Some(path) = &args.output {
        write_report(path, &report)?;
    }
    match args.format {
        OutputFormatArg::Table => print_analysis(&report),
        OutputFormatArg::Json => println!("{}", to_json(&report)?),
    }
    Ok(report)
}

pub fn run_compare(args: &CompareArgs, config: Option<&Path>) -> Result<ComparisonReport> {
    let options = resolve_options(
        config,
        OptionOverrides {
            calibration_bins: args.calibration_bins,
            metrics: args.metrics.clone(),
        },
    )?;
    let baseline = load_for_attribute(&args.baseline, &args.attr)?;
    let candidate = load_for_attribute(&args.candidate, &args.attr)?;

    let before = analyze_side(&baseline, &args.attr, &options, "baseline")?;
    let after = analyze_side(&candidate, &args.attr, &options, "candidate")?;
    let result = compare_results(&before, &after, &options).context("compare analyses")?;
    info!(
        improved = result.summary.improved,
        worsened = result.summary.worsened,
        unchanged = result.summary.unchanged,
        "comparison complete"
    );

    let report = ComparisonReport::new(baseline.metadata, candidate.metadata, result);
    if let Some(path) = &args.output {
        write_report(path, &report)?;
    }
    match args.format {
        OutputFormatArg::Table => print_comparison(&report),
        OutputFormatArg::Json => println!("{}", to_json(&report)?),
    }
    Ok(report)
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectionReport> {
    let loaded = load_csv_dataset(&args.dataset)?;
    let statistics = DatasetStatistics::from_dataset(&loaded.dataset)
        .with_context(|| format!("summarize {}", args.dataset.display()))?;
    let preview = preview_rows(&loaded.dataset, args.rows);
    info!(
        dataset_id = %loaded.metadata.dataset_id,
        columns = statistics.columns,
        preview_rows = preview.len(),
        "inspection complete"
    );

    let report = InspectionReport::new(loaded.metadata, statistics, preview);
    match args.format {
        OutputFormatArg::Table => print_inspection(&report),
        OutputFormatArg::Json => println!("{}", to_json(&report)?),
    }
    Ok(report)
}

fn load_for_attribute(path: &Path, attr: &str) -> Result<LoadedDataset> {
    let loaded = load_csv_dataset(path)?;
    validate_protected_attribute(&loaded.dataset, attr)
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(loaded)
}

fn analyze_side(
    loaded: &LoadedDataset,
    attr: &str,
    options: &AnalysisOptions,
    side: &str,
) -> Result<AnalysisResult> {
    analyze_with_options(&loaded.dataset, attr, options)
        .with_context(|| format!("analyze {side} {}", loaded.metadata.filename))
}
