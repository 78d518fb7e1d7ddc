//! TOML configuration file.
//!
//! ```toml
//! [analysis]
//! calibration_bins = 5
//! comparison_epsilon = 0.001
//! missing_group_label = "Not disclosed"
//! metrics = ["demographic_parity", "disparate_impact"]
//! ```
//!
//! Every key is optional; command line flags override file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use fairness_model::AnalysisOptions;

/// Parsed contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub analysis: AnalysisOptions,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Overrides taken from command line flags.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub calibration_bins: Option<usize>,
    /// Replaces the configured metric list when non-empty.
    pub metrics: Vec<String>,
}

impl OptionOverrides {
    pub fn apply(self, options: AnalysisOptions) -> AnalysisOptions {
        let options = match self.calibration_bins {
            Some(bins) => options.with_calibration_bins(bins),
            None => options,
        };
        if self.metrics.is_empty() {
            options
        } else {
            options.with_metrics(self.metrics)
        }
    }
}

/// Resolve analysis options from an optional config file and flag overrides.
pub fn resolve_options(path: Option<&Path>, overrides: OptionOverrides) -> Result<AnalysisOptions> {
    let config = FileConfig::load_optional(path)?;
    let options = overrides.apply(config.analysis);
    tracing::debug!(
        calibration_bins = options.calibration_bins,
        comparison_epsilon = options.comparison_epsilon,
        missing_group_label = %options.missing_group_label,
        metrics = ?options.metrics,
        "resolved analysis options"
    );
    Ok(options)
}
