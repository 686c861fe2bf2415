//! Domain layer for the tracker.
//!
//! Core types shared by every other layer, free of storage, rendering and runtime
//! concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: The application record read from the record store
//! - [`query`]: Structured filter input (date range, status and type sets)
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use jobtrail::domain::{ApplicationRecord, FilterQuery, Result};
//!
//! fn sample() -> Result<(Vec<ApplicationRecord>, FilterQuery)> {
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default();
//!     Ok((vec![ApplicationRecord::new("1", "ACME Corp", date)], FilterQuery::default()))
//! }
//! # sample().unwrap();
//! ```

pub mod error;
pub mod query;
pub mod record;

pub use error::{Result, TrackerError};
pub use query::{DateRange, FilterQuery};
pub use record::{ApplicationRecord, ApplicationStatus, RecordId};
