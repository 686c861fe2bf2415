//! Filter engine deriving the visible subset of the record collection.
//!
//! The derived view is a pure function of the collection, the structured
//! [`FilterQuery`] and the free-text search. It keeps the collection's order,
//! never sorts, never invents or duplicates records and has no state of its own,
//! so it is safe to recompute on every change.
//!
//! # Modules
//!
//! - [`predicates`]: The named conjuncts (text, date, status, type)
//! - [`stats`]: Summary counts and the application-type facet
//! - [`chips`]: Removable tokens describing the active filters
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use jobtrail::domain::{ApplicationRecord, ApplicationStatus, FilterQuery};
//! use jobtrail::filter::derive_view;
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let collection = vec![
//!     ApplicationRecord::new("1", "ACME Corp", day(1, 5)),
//!     ApplicationRecord::new("2", "Other Co", day(2, 10)).with_status(ApplicationStatus::Accepted),
//! ];
//!
//! let mut query = FilterQuery::default();
//! query.toggle_status(ApplicationStatus::Accepted);
//!
//! let view = derive_view(&collection, &query, "");
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].id.as_str(), "2");
//! ```

pub mod chips;
pub mod predicates;
pub mod stats;

pub use chips::{active_chips, filter_summary, FilterChip};
pub use predicates::Predicate;
pub use stats::{available_types, ViewStats};

use crate::domain::{ApplicationRecord, FilterQuery};

/// Returns the records of `collection` that satisfy every active predicate.
///
/// # Parameters
///
/// * `collection` - Every loaded record, in display order
/// * `query` - Date, status and type restrictions
/// * `search_text` - Case-insensitive substring over company, contact and notes
///
/// # Returns
///
/// The matching records in their original relative order. With an empty query
/// and empty search text the result equals the input.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use jobtrail::domain::{ApplicationRecord, ApplicationStatus, FilterQuery};
/// use jobtrail::filter::derive_view;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let collection = vec![
///     ApplicationRecord::new("1", "ACME Corp", day).with_status(ApplicationStatus::Accepted),
///     ApplicationRecord::new("2", "Globex", day),
/// ];
///
/// let mut query = FilterQuery::default();
/// query.toggle_status(ApplicationStatus::Accepted);
///
/// let view = derive_view(&collection, &query, "acme");
/// assert_eq!(view.len(), 1);
/// assert_eq!(view[0].id.as_str(), "1");
/// ```
#[must_use]
pub fn derive_view(collection: &[ApplicationRecord], query: &FilterQuery, search_text: &str) -> Vec<ApplicationRecord> {
    let _span = tracing::debug_span!(
        "derive_view",
        total_records = collection.len(),
        search_len = search_text.len(),
        statuses = query.status_set.len(),
        types = query.type_set.len(),
    )
    .entered();

    let predicates = Predicate::active(query, search_text);

    let view: Vec<ApplicationRecord> = collection
        .iter()
        .filter(|record| predicates.iter().all(|predicate| predicate.matches(record)))
        .cloned()
        .collect();

    tracing::debug!(
        active_predicates = predicates.len(),
        visible = view.len(),
        "derived view computed"
    );

    view
}
