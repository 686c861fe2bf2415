//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host shell (main.rs) and the
//! domain/filter/storage layers. It implements the event-driven flow behind the
//! list view.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Store Completions ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode and load state types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use jobtrail::app::{handle_event, AppState, Event};
//! use jobtrail::storage::{MemorySession, ViewStateStore};
//!
//! let mut state = AppState::new(ViewStateStore::new(Box::new(MemorySession::default())));
//! let (_needs_render, actions) = handle_event(&mut state, &Event::Mounted)?;
//! # Ok::<(), jobtrail::TrackerError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, FetchTicket};
pub use handler::{handle_event, Event};
pub use modes::{LoadState, ViewMode};
pub use state::AppState;
