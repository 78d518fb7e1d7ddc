pub mod assessment;
pub mod comparison;
pub mod dataset;
pub mod error;
pub mod ids;
pub mod options;
pub mod result;
pub mod stats;

pub use assessment::Assessment;
pub use comparison::{Change, ComparisonResult, ComparisonSummary, MetricComparison, OverallChange};
pub use dataset::{CellValue, ColumnLookup, Dataset, parse_binary, parse_number};
pub use error::{FairnessError, Result};
pub use ids::GroupKey;
pub use options::AnalysisOptions;
pub use result::{
    AnalysisResult, AnalysisSummary, Explanation, GroupSummary, MetricResult, MetricValues,
    OddsPoint, OverallAssessment, VisualizationData, VisualizationType,
};
pub use stats::{
    ACTUAL_COLUMN, ConfusionCounts, DatasetCapabilities, GroupStats, InputColumn,
    PREDICTED_COLUMN, SCORE_COLUMN, SHORTLISTED_COLUMN, ScoredOutcome,
};
