use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

use fairness_cli::config::{FileConfig, OptionOverrides, resolve_options};
use fairness_cli::report::{AnalysisReport, to_json, write_report};
use fairness_engine::analyze;
use fairness_ingest::load_csv_dataset;
use fairness_model::AnalysisOptions;

/// `male_selected` of 10 male rows and `female_selected` of 10 female rows.
fn selections_csv(male_selected: usize, female_selected: usize) -> String {
    let mut csv = String::from("gender,shortlisted\n");
    for (label, selected) in [("Male", male_selected), ("Female", female_selected)] {
        for idx in 0..10 {
            let flag = if idx < selected { "1" } else { "0" };
            csv.push_str(&format!("{label},{flag}\n"));
        }
    }
    csv
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fairness-audit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run fairness-audit")
}

#[test]
fn config_file_sets_analysis_options() {
    let config = FileConfig::parse(
        r#"
[analysis]
calibration_bins = 5
missing_group_label = "Not disclosed"
"#,
    )
    .expect("parse");
    assert_eq!(config.analysis.calibration_bins, 5);
    assert_eq!(config.analysis.missing_group_label, "Not disclosed");
    assert_eq!(
        config.analysis.comparison_epsilon,
        AnalysisOptions::default().comparison_epsilon
    );
}

#[test]
fn config_file_selects_metrics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        dir.path(),
        "audit.toml",
        "[analysis]\nmetrics = [\"disparate_impact\", \"theil_index\"]\n",
    );

    let from_file = resolve_options(Some(&path), OptionOverrides::default()).expect("resolve");
    assert_eq!(from_file.metrics, vec!["disparate_impact", "theil_index"]);

    let overridden = resolve_options(
        Some(&path),
        OptionOverrides {
            metrics: vec!["equal_opportunity".to_string()],
            ..OptionOverrides::default()
        },
    )
    .expect("resolve");
    assert_eq!(overridden.metrics, vec!["equal_opportunity"]);
}

#[test]
fn empty_config_uses_defaults() {
    let config = FileConfig::parse("").expect("parse");
    assert_eq!(config.analysis, AnalysisOptions::default());
}

#[test]
fn unknown_config_table_is_rejected() {
    assert!(FileConfig::parse("[thresholds]\nfair = 0.9\n").is_err());
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(dir.path(), "audit.toml", "[analysis]\ncalibration_bins = 5\n");

    let from_file = resolve_options(Some(&path), OptionOverrides::default()).expect("resolve");
    assert_eq!(from_file.calibration_bins, 5);

    let overridden = resolve_options(
        Some(&path),
        OptionOverrides {
            calibration_bins: Some(3),
            ..OptionOverrides::default()
        },
    )
    .expect("resolve");
    assert_eq!(overridden.calibration_bins, 3);

    let missing = resolve_options(
        Some(&dir.path().join("absent.toml")),
        OptionOverrides::default(),
    );
    let message = format!("{:#}", missing.expect_err("missing config"));
    assert!(message.contains("absent.toml"));
}

#[test]
fn analysis_report_wraps_result() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(dir.path(), "round1.csv", &selections_csv(5, 2));
    let loaded = load_csv_dataset(&path).expect("load");
    let result = analyze(&loaded.dataset, "gender").expect("analyze");
    let report = AnalysisReport::new(loaded.metadata, result);
    assert!(report.has_violations());

    let output = dir.path().join("report.json");
    write_report(&output, &report).expect("write report");
    let value: Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read report")).expect("json");

    let generated_at = value["generated_at"].as_str().expect("generated_at");
    assert!(chrono::DateTime::parse_from_rfc3339(generated_at).is_ok());
    assert_eq!(value["dataset"]["filename"], "round1.csv");
    assert_eq!(value["dataset"]["rows"], 20);
    assert_eq!(value["result"]["protected_attr"], "gender");
    insta::assert_json_snapshot!(value["result"]["summary"], @r#"
    {
      "total_metrics": 4,
      "fair": 1,
      "warning": 0,
      "violation": 3,
      "inconclusive": 0,
      "overall_assessment": "Needs Attention"
    }
    "#);
    assert_eq!(to_json(&report).expect("json"), fs::read_to_string(&output).expect("read"));
}

#[test]
fn analyze_exits_nonzero_on_violation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(dir.path(), "round1.csv", &selections_csv(5, 2));
    let csv = path.to_str().expect("utf-8 path");

    let output = run(&["analyze", csv, "--attr", "gender", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["result"]["summary"]["violation"], 3);

    let report = dir.path().join("out.json");
    let output = run(&[
        "analyze",
        csv,
        "--attr",
        "gender",
        "--no-fail-on-violation",
        "--output",
        report.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert!(report.exists());
}

#[test]
fn analyze_rejects_single_group_attribute() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(dir.path(), "one.csv", "gender,shortlisted\nMale,1\nMale,0\n");
    let output = run(&[
        "analyze",
        path.to_str().expect("utf-8 path"),
        "--attr",
        "gender",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
}

#[test]
fn compare_reports_improvement() {
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline = write_file(dir.path(), "before.csv", &selections_csv(5, 2));
    let candidate = write_file(dir.path(), "after.csv", &selections_csv(5, 4));

    let output = run(&[
        "compare",
        baseline.to_str().expect("utf-8 path"),
        candidate.to_str().expect("utf-8 path"),
        "--attr",
        "gender",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["baseline"]["filename"], "before.csv");
    assert_eq!(value["candidate"]["filename"], "after.csv");
    let summary = &value["result"]["summary"];
    assert_eq!(summary["worsened"], 0);
    assert!(summary["improved"].as_u64().expect("improved") >= 3);
    assert_eq!(summary["overall"], "Improved");
}

#[test]
fn metrics_lists_catalog() {
    let output = run(&["metrics"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("disparate_impact"));
    assert!(stdout.contains("theil_index"));
}

#[test]
fn metric_flag_limits_analysis() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(dir.path(), "round1.csv", &selections_csv(5, 2));
    let csv = path.to_str().expect("utf-8 path");

    let output = run(&[
        "analyze",
        csv,
        "--attr",
        "gender",
        "--metric",
        "disparate_impact",
        "--format",
        "json",
        "--no-fail-on-violation",
    ]);
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["result"]["summary"]["total_metrics"], 1);
    assert_eq!(value["result"]["metrics"][0]["metric_name"], "disparate_impact");

    let output = run(&["analyze", csv, "--attr", "gender", "--metric", "fairness"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown metric: fairness"));
}

#[test]
fn inspect_reports_statistics_and_preview() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(dir.path(), "round1.csv", &selections_csv(5, 2));
    let csv = path.to_str().expect("utf-8 path");

    let output = run(&["inspect", csv, "--rows", "3", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    let stats = &value["statistics"];
    assert_eq!(stats["rows"], 20);
    assert_eq!(stats["columns"], 2);
    assert_eq!(stats["numeric_columns"][0], "shortlisted");
    assert_eq!(stats["column_stats"]["gender"]["kind"], "categorical");
    assert_eq!(stats["column_stats"]["gender"]["unique_values"], 2);
    let mean = stats["column_stats"]["shortlisted"]["mean"]
        .as_f64()
        .expect("mean");
    assert!((mean - 0.35).abs() < 1e-12);
    assert_eq!(value["preview"].as_array().expect("preview").len(), 3);
    assert_eq!(value["preview"][0][0], "Male");

    let output = run(&["inspect", csv, "--rows", "2"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Preview (2 of 20 rows)"));
    assert!(stdout.contains("categorical"));
}
