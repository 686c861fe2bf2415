//! Removable chips describing the active filters.
//!
//! Every restricting part of a [`FilterQuery`] is shown as one chip: each date
//! bound, each selected status and each selected type. Removing a chip clears
//! exactly that part and leaves the rest of the query untouched.

use crate::domain::{ApplicationStatus, FilterQuery};
use chrono::NaiveDate;

const DISPLAY_DATE: &str = "%b %-d, %Y";

/// One active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChip {
    From(NaiveDate),
    To(NaiveDate),
    Status(ApplicationStatus),
    Type(String),
}

impl FilterChip {
    /// Text shown on the chip, e.g. `"From Jan 1, 2024"` or `"Not Hiring"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::From(date) => format!("From {}", date.format(DISPLAY_DATE)),
            Self::To(date) => format!("To {}", date.format(DISPLAY_DATE)),
            Self::Status(status) => status.label().to_string(),
            Self::Type(application_type) => application_type.clone(),
        }
    }

    /// Clears the part of `query` this chip stands for.
    pub fn remove_from(&self, query: &mut FilterQuery) {
        match self {
            Self::From(_) => query.date_range.start = None,
            Self::To(_) => query.date_range.end = None,
            Self::Status(status) => {
                query.status_set.remove(status);
            }
            Self::Type(application_type) => {
                query.type_set.remove(application_type);
            }
        }
    }
}

/// Chips for `query`: date bounds first, then statuses, then types.
#[must_use]
pub fn active_chips(query: &FilterQuery) -> Vec<FilterChip> {
    let range = &query.date_range;
    range
        .start
        .map(FilterChip::From)
        .into_iter()
        .chain(range.end.map(FilterChip::To))
        .chain(query.status_set.iter().copied().map(FilterChip::Status))
        .chain(query.type_set.iter().cloned().map(FilterChip::Type))
        .collect()
}

/// One-line description of the date bounds, e.g. `"From Jan 1, 2024 • To Feb 1, 2024"`.
///
/// Returns `None` when the query restricts nothing. A query restricted only by
/// status or type yields an empty summary, since those are listed as chips.
#[must_use]
pub fn filter_summary(query: &FilterQuery) -> Option<String> {
    if query.is_empty() {
        return None;
    }

    let parts: Vec<String> = active_chips(query)
        .iter()
        .filter(|chip| matches!(chip, FilterChip::From(_) | FilterChip::To(_)))
        .map(FilterChip::label)
        .collect();

    Some(parts.join(" \u{2022} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn busy_query() -> FilterQuery {
        let mut query = FilterQuery::default();
        query.date_range.start = Some(day(2024, 1, 1));
        query.date_range.end = Some(day(2024, 2, 1));
        query.toggle_status(ApplicationStatus::Accepted);
        query.toggle_type("email");
        query
    }

    #[test]
    fn chips_cover_every_restriction_in_order() {
        let chips = active_chips(&busy_query());
        assert_eq!(
            chips,
            vec![
                FilterChip::From(day(2024, 1, 1)),
                FilterChip::To(day(2024, 2, 1)),
                FilterChip::Status(ApplicationStatus::Accepted),
                FilterChip::Type("email".to_string()),
            ]
        );
        assert_eq!(chips[0].label(), "From Jan 1, 2024");
    }

    #[test]
    fn removing_a_chip_clears_only_its_part() {
        let mut query = busy_query();
        FilterChip::To(day(2024, 2, 1)).remove_from(&mut query);
        assert_eq!(query.date_range.start, Some(day(2024, 1, 1)));
        assert_eq!(query.date_range.end, None);
        assert_eq!(query.status_set.len(), 1);

        for chip in active_chips(&query) {
            chip.remove_from(&mut query);
        }
        assert!(query.is_empty());
    }

    #[test]
    fn summary_lists_date_bounds() {
        assert_eq!(filter_summary(&FilterQuery::default()), None);
        assert_eq!(
            filter_summary(&busy_query()).as_deref(),
            Some("From Jan 1, 2024 \u{2022} To Feb 1, 2024")
        );

        let mut status_only = FilterQuery::default();
        status_only.toggle_status(ApplicationStatus::Pending);
        assert_eq!(filter_summary(&status_only).as_deref(), Some(""));
    }
}
