#![deny(unsafe_code)]

pub mod catalog;
pub mod metric;
pub mod thresholds;

pub use catalog::{find_spec, list_metric_specs, spec};
pub use metric::{
    AssessmentPolicy, ExplanationTemplate, Guidance, MetricId, MetricSpec, SegmentLabels,
};
