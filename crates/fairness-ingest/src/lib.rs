#![deny(unsafe_code)]

pub mod age;
pub mod csv_table;
pub mod error;
pub mod frame;
pub mod load;
pub mod statistics;
pub mod store;
pub mod validate;

pub use age::{AGE_COLUMN, AGE_GROUP_COLUMN, age_band, derive_age_group};
pub use csv_table::{CsvTable, read_csv_table};
pub use error::IngestError;
pub use frame::{any_to_string, dataset_from_frame, format_numeric, frame_from_dataset};
pub use load::{DatasetMetadata, LoadedDataset, load_csv_dataset, prepare_dataset};
pub use statistics::{
    CategoricalSummary, ColumnStatistics, DEFAULT_PREVIEW_ROWS, DatasetStatistics, NumericSummary,
    TOP_VALUES_LIMIT, ValueCount, preview_rows,
};
pub use store::{DatasetId, DatasetStore, InMemoryDatasetStore};
pub use validate::{REQUIRED_COLUMNS, validate_protected_attribute, validate_required_columns};
