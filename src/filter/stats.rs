//! Summary counts and facets over the record collection.

use crate::domain::ApplicationRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Counts shown above the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    /// Records in the whole collection.
    pub total: usize,
    /// Records applied in the calendar month of the reference day.
    pub this_month: usize,
    /// Records in the derived view.
    pub filtered: usize,
}

impl ViewStats {
    /// Counts `collection` and `view`.
    ///
    /// `today` picks the calendar month for `this_month`; it is passed in
    /// rather than read from the clock.
    #[must_use]
    pub fn compute(collection: &[ApplicationRecord], view: &[ApplicationRecord], today: NaiveDate) -> Self {
        let this_month = collection
            .iter()
            .filter(|record| {
                record.applied_on.year() == today.year() && record.applied_on.month() == today.month()
            })
            .count();

        Self {
            total: collection.len(),
            this_month,
            filtered: view.len(),
        }
    }
}

/// Distinct, non-empty application types in first-seen order.
///
/// Feeds the type facet of the filter dialog.
#[must_use]
pub fn available_types(collection: &[ApplicationRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    collection
        .iter()
        .filter_map(|record| record.application_type.as_deref())
        .filter(|application_type| !application_type.is_empty())
        .filter(|application_type| seen.insert(*application_type))
        .map(String::from)
        .collect()
}
