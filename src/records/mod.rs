//! Access to the application record collection.
//!
//! # Modules
//!
//! - `backend`: [`RecordStore`] trait
//! - `json`: [`JsonRecordStore`] reading a JSON export
//! - `memory`: [`MemoryRecordStore`] for tests

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::RecordStore;
pub use json::JsonRecordStore;
pub use memory::MemoryRecordStore;
