pub mod dataset_cache;
pub mod dataset_models;
pub mod sheet_source;

pub use dataset_cache::{DatasetCache, RefreshOutcome};
pub use dataset_models::{DatasetSummary, Row, TabularDataset};
pub use sheet_source::{FetchError, SheetSource};
