//! Session storage backend abstraction.
//!
//! This module defines the [`SessionBackend`] trait: a string key/value store
//! whose contents live only as long as the current session. Every method is
//! fallible so callers can model quota errors and disabled storage; the
//! [`ViewStateStore`](crate::storage::ViewStateStore) on top swallows those
//! failures.

use crate::domain::error::Result;

/// Abstraction over session-scoped key/value storage.
///
/// # Implementations
///
/// - [`MemorySession`](crate::storage::MemorySession): in-process map, optional byte quota
/// - [`UnavailableSession`](crate::storage::UnavailableSession): storage disabled
/// - [`JsonSessionFile`](crate::storage::JsonSessionFile): JSON file in the session runtime directory
///
/// # Examples
///
/// ```
/// use jobtrail::storage::{MemorySession, SessionBackend};
///
/// let mut session = MemorySession::default();
/// session.set("list.view_mode", "list")?;
/// assert_eq!(session.get("list.view_mode")?.as_deref(), Some("list"));
/// # Ok::<(), jobtrail::TrackerError>(())
/// ```
pub trait SessionBackend: Send {
    /// Reads the value stored under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected (quota, disabled storage) or
    /// cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Removes every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn clear(&mut self) -> Result<()>;

    /// Ends the session. Nothing stored so far may be read by a later session.
    ///
    /// The default forgets every key; backends that keep a file delete it.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be discarded.
    fn end_session(&mut self) -> Result<()> {
        self.clear()
    }
}

impl<T: SessionBackend + ?Sized> SessionBackend for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn end_session(&mut self) -> Result<()> {
        (**self).end_session()
    }
}
