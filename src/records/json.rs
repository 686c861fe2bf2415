//! Record store backed by a JSON export of the remote collection.
//!
//! The file holds a JSON array of records in the store's wire shape and is
//! re-read on every fetch, so edits made elsewhere show up on the next refresh.

use crate::domain::{ApplicationRecord, RecordId, Result, TrackerError};
use crate::records::backend::RecordStore;
use std::path::{Path, PathBuf};

/// File-backed [`RecordStore`].
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    file_path: PathBuf,
}

impl JsonRecordStore {
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_all(&self, records: &[ApplicationRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| TrackerError::Storage(format!("failed to serialize records: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn fetch_all(&self) -> Result<Vec<ApplicationRecord>> {
        let _span = tracing::debug_span!("records_fetch_all", path = ?self.file_path).entered();

        let contents = std::fs::read_to_string(&self.file_path).map_err(|e| {
            TrackerError::Fetch(format!("cannot read {}: {e}", self.file_path.display()))
        })?;

        let records: Vec<ApplicationRecord> = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Fetch(format!("invalid record export: {e}")))?;

        tracing::debug!(count = records.len(), "records fetched");
        Ok(records)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let _span = tracing::debug_span!("records_delete", id = %id).entered();

        let mut records = self.fetch_all()?;
        let before = records.len();
        records.retain(|record| &record.id != id);
        if records.len() == before {
            return Err(TrackerError::NotFound(id.clone()));
        }

        self.write_all(&records)?;
        tracing::info!(id = %id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn write_export(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("applications.json");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let records = vec![
            ApplicationRecord::new("1", "ACME Corp", date),
            ApplicationRecord::new("2", "Globex", date).with_type("email"),
        ];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
        path
    }

    #[test]
    fn fetches_in_file_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonRecordStore::new(write_export(&dir));

        let records = store.fetch_all().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(
            store.fetch_by_id(&RecordId::from("2")).unwrap().company_name,
            "Globex"
        );
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonRecordStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.fetch_all(), Err(TrackerError::Fetch(_))));
    }

    #[test]
    fn delete_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonRecordStore::new(write_export(&dir));

        store.delete(&RecordId::from("1")).unwrap();
        assert_eq!(store.fetch_all().unwrap().len(), 1);
        assert!(matches!(
            store.delete(&RecordId::from("1")),
            Err(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            store.fetch_by_id(&RecordId::from("1")),
            Err(TrackerError::NotFound(_))
        ));
    }
}
