//! In-process session backends.

use crate::domain::error::{Result, TrackerError};
use crate::storage::backend::SessionBackend;
use std::collections::HashMap;

/// Session storage held in memory for the life of the process.
///
/// An optional byte quota (keys plus values) makes writes fail the way a full
/// browser session store does.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemorySession {
    /// Creates a store that rejects writes once `quota_bytes` would be exceeded.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SessionBackend for MemorySession {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                tracing::debug!(key = %key, needed, quota, "session quota exceeded");
                return Err(TrackerError::Storage(format!(
                    "quota exceeded writing {key} ({needed} > {quota} bytes)"
                )));
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Session storage that is switched off: every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSession;

impl SessionBackend for UnavailableSession {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(TrackerError::Storage("session storage unavailable".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(TrackerError::Storage("session storage unavailable".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(TrackerError::Storage("session storage unavailable".to_string()))
    }

    fn clear(&mut self) -> Result<()> {
        Err(TrackerError::Storage("session storage unavailable".to_string()))
    }
}
