//! View and load mode types for the list view.
//!
//! # State Machine
//!
//! The collection moves through three load states:
//!
//! ```text
//! Loading ──fetch ok──► Ready
//!    │                    │
//!    └──fetch err──► Failed ──retry──► Loading
//! ```
//!
//! Independently, the view mode decides how each visible record is presented:
//! - **Card**: multi-line cards (the default)
//! - **List**: one compact row per record
//!
//! # Example
//!
//! ```rust
//! use jobtrail::app::modes::ViewMode;
//!
//! assert_eq!(ViewMode::default(), ViewMode::Card);
//! assert_eq!("list".parse::<ViewMode>(), Ok(ViewMode::List));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation of the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Multi-line card per record.
    #[default]
    Card,

    /// One row per record.
    List,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "list" => Ok(Self::List),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// Progress of the collection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A fetch is in flight and no collection has arrived yet.
    Loading,

    /// The latest fetch succeeded.
    Ready,

    /// The latest fetch failed. Retryable via [`crate::app::Event::Retry`].
    Failed {
        /// Message shown in place of the list.
        message: String,
    },
}
