//! Fairness metric engine.
//!
//! Turns a parsed [`Dataset`](fairness_model::Dataset) into per-group
//! statistics, evaluates every catalog metric the dataset supports, classifies
//! each result and attaches explanation text. Two analyses of the same
//! protected attribute can be compared metric by metric.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod analyze;
pub mod classify;
pub mod compare;
pub mod explain;
pub mod metrics;

pub use aggregate::{AggregatedGroups, GroupStatsAggregator, detect_capabilities};
pub use analyze::{analyze, analyze_with_options};
pub use classify::classify;
pub use compare::{classify_change, compare, compare_results, compare_with_options};
pub use fairness_catalog::{MetricSpec, list_metric_specs};
