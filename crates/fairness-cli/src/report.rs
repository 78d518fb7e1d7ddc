//! JSON reports written by the command line tool.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use fairness_ingest::{DatasetMetadata, DatasetStatistics};
use fairness_model::{AnalysisResult, ComparisonResult};

/// Analysis output together with the dataset it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// RFC 3339 timestamp.
    pub generated_at: String,
    pub dataset: DatasetMetadata,
    pub result: AnalysisResult,
}

impl AnalysisReport {
    pub fn new(dataset: DatasetMetadata, result: AnalysisResult) -> Self {
        Self {
            generated_at: timestamp(),
            dataset,
            result,
        }
    }

    /// Violations make the run fail unless the caller opted out.
    pub fn has_violations(&self) -> bool {
        self.result.summary.has_violations()
    }
}

/// Comparison output together with both datasets.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub generated_at: String,
    pub baseline: DatasetMetadata,
    pub candidate: DatasetMetadata,
    pub result: ComparisonResult,
}

impl ComparisonReport {
    pub fn new(
        baseline: DatasetMetadata,
        candidate: DatasetMetadata,
        result: ComparisonResult,
    ) -> Self {
        Self {
            generated_at: timestamp(),
            baseline,
            candidate,
            result,
        }
    }
}

/// Column statistics and a row preview of one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub generated_at: String,
    pub dataset: DatasetMetadata,
    pub statistics: DatasetStatistics,
    /// Leading rows in column order; missing cells are null.
    pub preview: Vec<Vec<Option<String>>>,
}

impl InspectionReport {
    pub fn new(
        dataset: DatasetMetadata,
        statistics: DatasetStatistics,
        preview: Vec<Vec<Option<String>>>,
    ) -> Self {
        Self {
            generated_at: timestamp(),
            dataset,
            statistics,
            preview,
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

/// Write `report` as pretty JSON.
pub fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let json = to_json(report)?;
    fs::write(path, json).with_context(|| format!("write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}
