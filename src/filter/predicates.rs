//! Named filter predicates.
//!
//! Each predicate tests one independent aspect of a record. A predicate is only
//! built when its input restricts something, so an empty search string, an
//! unbounded date range or an empty set never appears in the active list.

use crate::domain::{ApplicationRecord, ApplicationStatus, DateRange, FilterQuery};
use std::collections::BTreeSet;

/// One conjunct of the derived-view filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<'q> {
    /// Status must be one of the selected statuses.
    Status(&'q BTreeSet<ApplicationStatus>),
    /// Application type must be one of the selected types.
    Type(&'q BTreeSet<String>),
    /// Applied-on date must fall inside the range.
    Date(DateRange),
    /// Company name, contact or notes must contain the needle (already folded
    /// with [`fold_case`]).
    Text(String),
}

impl<'q> Predicate<'q> {
    /// Builds the active predicates for `query` and `search_text`.
    ///
    /// Set-membership predicates come first and substring search last, so the
    /// cheapest tests reject a record before any lowercasing happens.
    ///
    /// # Parameters
    ///
    /// * `query` - Date range plus status and type sets; empty parts add nothing
    /// * `search_text` - Raw search input, whitespace included
    ///
    /// # Returns
    ///
    /// The predicates a record must all satisfy. Empty when nothing restricts
    /// the view.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobtrail::domain::FilterQuery;
    /// use jobtrail::filter::predicates::Predicate;
    ///
    /// let query = FilterQuery::default();
    /// assert!(Predicate::active(&query, "").is_empty());
    /// assert_eq!(Predicate::active(&query, "ACME"), vec![Predicate::Text("acme".into())]);
    /// ```
    #[must_use]
    pub fn active(query: &'q FilterQuery, search_text: &str) -> Vec<Self> {
        let mut predicates = Vec::with_capacity(4);

        if !query.status_set.is_empty() {
            predicates.push(Self::Status(&query.status_set));
        }
        if !query.type_set.is_empty() {
            predicates.push(Self::Type(&query.type_set));
        }
        if !query.date_range.is_unbounded() {
            predicates.push(Self::Date(query.date_range));
        }
        if !search_text.is_empty() {
            predicates.push(Self::Text(fold_case(search_text)));
        }

        predicates
    }

    /// Tests `record` against this one predicate.
    #[must_use]
    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        match self {
            Self::Status(statuses) => matches_status(record, statuses),
            Self::Type(types) => matches_type(record, types),
            Self::Date(range) => matches_date(record, range),
            Self::Text(needle) => matches_text(record, needle),
        }
    }
}

/// Lowercases every character, expanding those with multi-character lowercase
/// forms (`İ` becomes `i` followed by U+0307).
///
/// Search text and record fields are both folded this way, and so is the
/// highlighting in [`match_ranges`](crate::ui::helpers::match_ranges).
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive containment over company name, contact and notes.
///
/// # Parameters
///
/// * `record` - Record whose text fields are searched; absent fields never match
/// * `needle` - Search text already folded with [`fold_case`]. Whitespace is
///   significant
///
/// # Returns
///
/// `true` if any of the three fields contains `needle`.
#[must_use]
pub fn matches_text(record: &ApplicationRecord, needle: &str) -> bool {
    let contains = |field: &str| fold_case(field).contains(needle);

    contains(&record.company_name)
        || contains(record.contact.as_deref().unwrap_or_default())
        || contains(record.notes.as_deref().unwrap_or_default())
}

/// Inclusive on both bounds; see [`DateRange::contains`].
#[must_use]
pub fn matches_date(record: &ApplicationRecord, range: &DateRange) -> bool {
    range.contains(record.applied_on)
}

/// An empty set matches every record.
#[must_use]
pub fn matches_status(record: &ApplicationRecord, statuses: &BTreeSet<ApplicationStatus>) -> bool {
    statuses.is_empty() || statuses.contains(&record.status)
}

/// An empty set matches every record; otherwise an untyped record never matches.
#[must_use]
pub fn matches_type(record: &ApplicationRecord, types: &BTreeSet<String>) -> bool {
    if types.is_empty() {
        return true;
    }
    record
        .application_type
        .as_ref()
        .is_some_and(|application_type| types.contains(application_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> ApplicationRecord {
        ApplicationRecord::new("1", "ACME Corp", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    }

    #[test]
    fn text_matches_any_searchable_field() {
        let plain = record();
        assert!(matches_text(&plain, "acme"));
        assert!(!matches_text(&plain, "recruiter"));

        let with_contact = record().with_contact("Recruiter@ACME.io");
        assert!(matches_text(&with_contact, "recruiter@"));

        let with_notes = record().with_notes("Referred by Dana");
        assert!(matches_text(&with_notes, "dana"));
    }

    #[test]
    fn text_whitespace_is_literal() {
        let plain = record();
        assert!(matches_text(&plain, "acme corp"));
        assert!(!matches_text(&plain, "  "));
        assert!(matches_text(&plain, " "));
    }

    #[test]
    fn untyped_record_never_matches_type_set() {
        let types: BTreeSet<String> = ["email".to_string()].into();
        assert!(!matches_type(&record(), &types));
        assert!(matches_type(&record().with_type("email"), &types));
        assert!(!matches_type(&record().with_type("other"), &types));
        assert!(matches_type(&record(), &BTreeSet::new()));
    }

    #[test]
    fn status_set_membership() {
        let accepted: BTreeSet<_> = [ApplicationStatus::Accepted].into();
        assert!(!matches_status(&record(), &accepted));
        assert!(matches_status(&record().with_status(ApplicationStatus::Accepted), &accepted));
    }

    #[test]
    fn empty_inputs_build_no_predicates() {
        let query = FilterQuery::default();
        assert!(Predicate::active(&query, "").is_empty());
    }

    #[test]
    fn cheap_predicates_come_before_text() {
        let mut query = FilterQuery::default();
        query.toggle_status(ApplicationStatus::Pending);
        query.date_range.end = NaiveDate::from_ymd_opt(2024, 12, 31);

        let predicates = Predicate::active(&query, "ACME");
        assert!(matches!(predicates[0], Predicate::Status(_)));
        assert!(matches!(predicates[1], Predicate::Date(_)));
        assert_eq!(predicates[2], Predicate::Text("acme".to_string()));
        assert!(predicates.iter().all(|p| p.matches(&record())));
    }
}
