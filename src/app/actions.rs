//! Actions representing side effects to be executed by the host shell.
//!
//! The event handler never talks to the record store or navigates by itself.
//! It returns a `Vec<Action>` after processing each event and the shell
//! executes them in order, feeding the results back as events
//! ([`Event::CollectionLoaded`](crate::app::Event::CollectionLoaded),
//! [`Event::RecordDeleted`](crate::app::Event::RecordDeleted), ...).
//!
//! # Example
//!
//! ```rust
//! use jobtrail::app::{Action, FetchTicket};
//!
//! let action = Action::FetchCollection { ticket: FetchTicket(1) };
//! assert!(matches!(action, Action::FetchCollection { .. }));
//! ```

use crate::domain::RecordId;
use std::fmt;

/// Sequence number ordering collection fetches.
///
/// Only the completion carrying the latest issued ticket is applied, so a slow
/// early fetch can never overwrite the result of a later one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub u64);

impl FetchTicket {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Commands representing side effects to be executed by the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetches the whole record collection.
    ///
    /// The result comes back as `CollectionLoaded` or `FetchFailed` carrying
    /// the same ticket.
    FetchCollection {
        ticket: FetchTicket,
    },

    /// Leaves the list for the record's edit flow.
    ///
    /// The scroll target has already been stored when this is emitted.
    OpenEditor {
        id: RecordId,
    },

    /// Deletes the record from the store.
    ///
    /// Confirmed with `RecordDeleted` on success.
    DeleteRecord {
        id: RecordId,
    },
}
