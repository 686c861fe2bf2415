//! Error types for the tracker.
//!
//! This module defines the centralized error type [`TrackerError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! Only the record-store boundary surfaces errors to callers. Session persistence
//! failures are recovered inside [`crate::storage::ViewStateStore`] and never reach
//! the presentation layer.

use crate::domain::record::RecordId;
use thiserror::Error;

/// The main error type for tracker operations.
///
/// # Examples
///
/// ```
/// use jobtrail::domain::{RecordId, TrackerError};
///
/// let err = TrackerError::NotFound(RecordId::from("42"));
/// assert_eq!(err.to_string(), "Record not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Session storage operation failed.
    ///
    /// Raised by [`crate::storage::SessionBackend`] implementations when a key cannot
    /// be read or written (quota exceeded, storage disabled, corrupt file).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching the record collection failed.
    ///
    /// Covers transport and parse failures of the record store. Surfaced to the
    /// presentation layer as a retryable error state.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A record lookup by id found nothing.
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
