//! JSON file-based session backend.
//!
//! Keeps the session's key/value pairs in a single JSON file inside the
//! session directory, so the state survives navigating away and back but
//! disappears with the session: [`SessionBackend::end_session`] deletes the
//! file when the host shuts down. Writes use write-to-temp + rename so a crash
//! never leaves a torn file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "list.search": "acme",
//!     "list.view_mode": "list"
//!   }
//! }
//! ```

use crate::domain::error::{Result, TrackerError};
use crate::storage::backend::SessionBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionData {
    /// Version of the file format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// Session backend persisted to a JSON file.
///
/// The whole map is held in memory and rewritten on every change.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; owned by the single UI thread.
#[derive(Debug)]
pub struct JsonSessionFile {
    file_path: PathBuf,
    data: SessionData,
    dirty: bool,
}

impl JsonSessionFile {
    /// Opens the session file, creating parent directories as needed.
    ///
    /// A missing file starts an empty session.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but cannot be read or contains invalid JSON
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jobtrail::storage::JsonSessionFile;
    /// use std::path::PathBuf;
    ///
    /// let session = JsonSessionFile::open(PathBuf::from("/run/user/1000/jobtrail/session.json"))?;
    /// # Ok::<(), jobtrail::TrackerError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening session file");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("starting empty session");
            SessionData::default()
        };

        tracing::debug!(entries = data.entries.len(), "session file opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<SessionData> {
        let contents = std::fs::read_to_string(path)?;
        let data: SessionData = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(version = data.version, entries = data.entries.len(), "loaded session data");
        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| TrackerError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "session saved");
        Ok(())
    }
}

impl SessionBackend for JsonSessionFile {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::trace_span!("session_set", key = %key).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.entries.remove(key).is_some() {
            self.dirty = true;
            self.save_to_file()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.data.entries.clear();
        self.dirty = true;
        self.save_to_file()
    }

    /// Deletes the file so nothing outlives the session.
    fn end_session(&mut self) -> Result<()> {
        self.data.entries.clear();
        self.dirty = false;
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
        }
        tracing::debug!(path = ?self.file_path, "session ended");
        Ok(())
    }
}

impl Drop for JsonSessionFile {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty session on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save session on drop");
            }
        }
    }
}
