//! In-memory record store with failure injection.

use crate::domain::{ApplicationRecord, RecordId, Result, TrackerError};
use crate::records::backend::RecordStore;

/// [`RecordStore`] over a `Vec`, for tests and demos.
///
/// # Examples
///
/// ```
/// use jobtrail::records::{MemoryRecordStore, RecordStore};
///
/// let mut store = MemoryRecordStore::default();
/// store.fail_fetches("network down");
/// assert!(store.fetch_all().is_err());
/// store.heal();
/// assert!(store.fetch_all().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<ApplicationRecord>,
    fetch_failure: Option<String>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new(records: Vec<ApplicationRecord>) -> Self {
        Self {
            records,
            fetch_failure: None,
        }
    }

    /// Makes every fetch fail with `message` until [`heal`](Self::heal).
    pub fn fail_fetches(&mut self, message: impl Into<String>) {
        self.fetch_failure = Some(message.into());
    }

    pub fn heal(&mut self) {
        self.fetch_failure = None;
    }

    pub fn push(&mut self, record: ApplicationRecord) {
        self.records.push(record);
    }
}

impl RecordStore for MemoryRecordStore {
    fn fetch_all(&self) -> Result<Vec<ApplicationRecord>> {
        match &self.fetch_failure {
            Some(message) => Err(TrackerError::Fetch(message.clone())),
            None => Ok(self.records.clone()),
        }
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        if self.records.len() == before {
            return Err(TrackerError::NotFound(id.clone()));
        }
        Ok(())
    }
}
