//! Dataset storage keyed by content digest.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use fairness_model::{CellValue, Dataset};

/// Hex-encoded SHA-256 digest of a dataset's columns and cells.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    /// Digest of the dataset content; equal content always yields the same id.
    pub fn of(dataset: &Dataset) -> Self {
        const UNIT: &[u8] = &[0x1f];
        const RECORD: &[u8] = &[0x1e];

        let mut hasher = Sha256::new();
        for column in dataset.columns() {
            hasher.update(column.as_bytes());
            hasher.update(UNIT);
        }
        hasher.update(RECORD);
        for row in dataset.rows() {
            for cell in row {
                match cell {
                    CellValue::Text(value) => {
                        hasher.update(b"T");
                        hasher.update(value.as_bytes());
                    }
                    CellValue::Missing => hasher.update(b"M"),
                }
                hasher.update(UNIT);
            }
            hasher.update(RECORD);
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for uploaded datasets.
///
/// A stored dataset is never mutated; `put` on an existing id replaces the
/// shared handle, and readers holding the old handle keep their copy.
pub trait DatasetStore: Send + Sync {
    fn get(&self, id: &DatasetId) -> Option<Arc<Dataset>>;

    fn put(&self, id: DatasetId, dataset: Arc<Dataset>);

    /// Remove a dataset; returns whether it was present.
    fn delete(&self, id: &DatasetId) -> bool;

    /// Store a dataset under its content digest.
    fn insert(&self, dataset: Dataset) -> DatasetId {
        let id = DatasetId::of(&dataset);
        self.put(id.clone(), Arc::new(dataset));
        id
    }
}

/// Process-lifetime store backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryDatasetStore {
    datasets: RwLock<HashMap<DatasetId, Arc<Dataset>>>,
}

impl InMemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.datasets.read().map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn get(&self, id: &DatasetId) -> Option<Arc<Dataset>> {
        // A poisoned lock still holds consistent data: writers only swap Arcs.
        let map = self
            .datasets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.get(id).cloned()
    }

    fn put(&self, id: DatasetId, dataset: Arc<Dataset>) {
        let mut map = self
            .datasets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        tracing::debug!(dataset_id = %id, rows = dataset.len(), "stored dataset");
        map.insert(id, dataset);
    }

    fn delete(&self, id: &DatasetId) -> bool {
        let mut map = self
            .datasets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(flag: &str) -> Dataset {
        Dataset::from_records(["gender", "shortlisted"], vec![vec!["M", flag]])
    }

    #[test]
    fn id_depends_on_content() {
        assert_eq!(DatasetId::of(&sample("1")), DatasetId::of(&sample("1")));
        assert_ne!(DatasetId::of(&sample("1")), DatasetId::of(&sample("0")));
        assert_eq!(DatasetId::of(&sample("1")).as_str().len(), 64);

        let blank = Dataset::from_records(["a", "b"], vec![vec!["", "x"]]);
        let shifted = Dataset::from_records(["a", "b"], vec![vec!["x", ""]]);
        assert_ne!(DatasetId::of(&blank), DatasetId::of(&shifted));
    }

    #[test]
    fn put_get_delete() {
        let store = InMemoryDatasetStore::new();
        let id = store.insert(sample("1"));
        assert_eq!(store.len(), 1);
        let held = store.get(&id).expect("stored");
        assert_eq!(held.len(), 1);

        assert!(store.delete(&id));
        assert!(!store.delete(&id));
        assert!(store.get(&id).is_none());
        assert_eq!(held.rows()[0][1].as_text(), Some("1"));
    }

    #[test]
    fn store_is_shareable_across_threads() {
        let store: Arc<dyn DatasetStore> = Arc::new(InMemoryDatasetStore::new());
        let id = store.insert(sample("1"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = id.clone();
                std::thread::spawn(move || store.get(&id).map(|ds| ds.len()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), Some(1));
        }
    }
}
