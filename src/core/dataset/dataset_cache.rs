use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::dataset_models::TabularDataset;
use super::sheet_source::{FetchError, SheetSource};

/// What a successful refresh reports back to the caller.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub row_count: usize,
    pub column_count: usize,
}

/// Process-wide owner of the current dataset snapshot.
///
/// **Copy-then-swap:** a refresh fetches and validates the new dataset
/// entirely before taking the write lock, so readers observe either the
/// old snapshot or the new one, never a partially replaced mix. Readers
/// hold the lock only long enough to clone the `Arc`.
///
/// **Single writer:** refreshes serialize on `refresh_gate`, so at most
/// one fetch is in flight at a time.
pub struct DatasetCache {
    current: RwLock<Arc<TabularDataset>>,
    refresh_gate: Mutex<()>,
}

impl DatasetCache {
    /// Starts with the empty dataset; populate it via `refresh`.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(TabularDataset::empty())),
            refresh_gate: Mutex::new(()),
        }
    }

    /// The current snapshot. Valid for the duration of one request; the
    /// caller must not hold it across refreshes expecting fresh data.
    pub async fn snapshot(&self) -> Arc<TabularDataset> {
        self.current.read().await.clone()
    }

    /// Replace the dataset wholesale from the given source.
    ///
    /// All-or-nothing: if the fetch or the dataset construction fails, the
    /// previous snapshot is left untouched and the error is returned.
    pub async fn refresh(&self, source: &dyn SheetSource) -> Result<RefreshOutcome, FetchError> {
        let _gate = self.refresh_gate.lock().await;

        let values = source.fetch_values().await?;
        let dataset = TabularDataset::from_values(values)?;
        let outcome = RefreshOutcome {
            row_count: dataset.row_count(),
            column_count: dataset.headers().len(),
        };

        *self.current.write().await = Arc::new(dataset);
        Ok(outcome)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}
