//! Storage layer for session-scoped view state.
//!
//! The list view remembers its search, filters, view mode and scroll target for
//! as long as the session lasts, and nothing beyond that.
//!
//! # Modules
//!
//! - `backend`: [`SessionBackend`] trait over key/value session storage
//! - `memory`: In-process backends (plain, quota-limited, unavailable)
//! - `json`: JSON file backend in the session runtime directory
//! - `models`: [`ViewState`], [`ViewStatePatch`] and their session keys
//! - `view_state`: [`ViewStateStore`], the failure-swallowing load/save facade

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
pub mod view_state;

pub use backend::SessionBackend;
pub use json::JsonSessionFile;
pub use memory::{MemorySession, UnavailableSession};
pub use models::{ViewState, ViewStatePatch};
pub use view_state::ViewStateStore;
