//! Record store abstraction.

use crate::domain::{ApplicationRecord, RecordId, Result};

/// Source of truth for the application records.
///
/// The list view only reads whole collections and deletes single records;
/// creating and editing happen in flows outside this crate.
pub trait RecordStore {
    /// Fetches the full collection in store order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TrackerError::Fetch`] when the collection cannot be
    /// read or decoded.
    fn fetch_all(&self) -> Result<Vec<ApplicationRecord>>;

    /// Fetches one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TrackerError::NotFound`] when no record has `id`, or
    /// [`crate::TrackerError::Fetch`] when the store cannot be read.
    fn fetch_by_id(&self, id: &RecordId) -> Result<ApplicationRecord> {
        self.fetch_all()?
            .into_iter()
            .find(|record| &record.id == id)
            .ok_or_else(|| crate::TrackerError::NotFound(id.clone()))
    }

    /// Deletes one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TrackerError::NotFound`] when no record has `id`.
    fn delete(&mut self, id: &RecordId) -> Result<()>;
}
