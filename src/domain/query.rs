//! Filter query model.
//!
//! A [`FilterQuery`] holds the structured half of the list view's filter input:
//! an inclusive date range plus status and application-type sets. The free-text
//! search travels beside it (see [`crate::filter::derive_view`]).
//!
//! Empty sets mean "no restriction", never "exclude everything".
//!
//! # Persisted shape
//!
//! ```json
//! {
//!   "startDate": "2024-01-01",
//!   "endDate": "",
//!   "status": ["Accepted", "Followed up"],
//!   "applicationTypes": ["email"]
//! }
//! ```
//!
//! An absent bound is written as an empty string.

use super::record::ApplicationStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive calendar-date range with optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "startDate", default, with = "blank_date")]
    pub start: Option<NaiveDate>,

    #[serde(rename = "endDate", default, with = "blank_date")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns whether `date` lies within the bounds that are present.
    ///
    /// A missing bound leaves that side open. An inverted range (end before start)
    /// contains nothing.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Structured filter input of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(flatten)]
    pub date_range: DateRange,

    #[serde(rename = "status", default)]
    pub status_set: BTreeSet<ApplicationStatus>,

    #[serde(rename = "applicationTypes", default)]
    pub type_set: BTreeSet<String>,
}

impl FilterQuery {
    /// Returns `true` when no part of the query restricts anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date_range.is_unbounded() && self.status_set.is_empty() && self.type_set.is_empty()
    }

    /// Adds `status` to the status set, or removes it if already selected.
    pub fn toggle_status(&mut self, status: ApplicationStatus) {
        if !self.status_set.remove(&status) {
            self.status_set.insert(status);
        }
    }

    /// Adds `application_type` to the type set, or removes it if already selected.
    pub fn toggle_type(&mut self, application_type: &str) {
        if !self.type_set.remove(application_type) {
            self.type_set.insert(application_type.to_string());
        }
    }

    /// Resets every part of the query: both date bounds and both sets.
    ///
    /// Search text lives outside the query and is left alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobtrail::domain::{ApplicationStatus, FilterQuery};
    ///
    /// let mut query = FilterQuery::default();
    /// query.toggle_status(ApplicationStatus::Pending);
    /// query.toggle_type("email");
    /// query.clear();
    /// assert!(query.is_empty());
    /// ```
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// `Option<NaiveDate>` codec that writes `None` as `""` and reads `""` back as `None`.
mod blank_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid date {raw}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_bounds_contain_everything_on_their_side() {
        let from_only = DateRange::new(Some(date(2024, 2, 1)), None);
        assert!(from_only.contains(date(2030, 1, 1)));
        assert!(from_only.contains(date(2024, 2, 1)));
        assert!(!from_only.contains(date(2024, 1, 31)));

        let to_only = DateRange::new(None, Some(date(2024, 2, 1)));
        assert!(to_only.contains(date(1999, 1, 1)));
        assert!(!to_only.contains(date(2024, 2, 2)));
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let inverted = DateRange::new(Some(date(2024, 3, 1)), Some(date(2024, 2, 1)));
        assert!(!inverted.contains(date(2024, 2, 15)));
        assert!(!inverted.is_unbounded());
    }

    #[test]
    fn toggling_twice_restores_the_query() {
        let mut query = FilterQuery::default();
        query.toggle_status(ApplicationStatus::Rejected);
        query.toggle_type("email");
        assert!(!query.is_empty());

        query.toggle_status(ApplicationStatus::Rejected);
        query.toggle_type("email");
        assert!(query.is_empty());
    }

    #[test]
    fn persisted_shape_uses_blank_strings_for_missing_bounds() {
        let mut query = FilterQuery::default();
        query.date_range.start = Some(date(2024, 1, 1));
        query.toggle_status(ApplicationStatus::FollowedUp);

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["startDate"], "2024-01-01");
        assert_eq!(value["endDate"], "");
        assert_eq!(value["status"][0], "Followed up");
        assert!(value["applicationTypes"].as_array().unwrap().is_empty());

        let back: FilterQuery = serde_json::from_value(value).unwrap();
        assert_eq!(back, query);
    }

    #[test]
    fn missing_fields_deserialize_as_unrestricted() {
        let query: FilterQuery = serde_json::from_str(r#"{"startDate":"","endDate":"","status":[]}"#).unwrap();
        assert!(query.is_empty());

        let query: FilterQuery = serde_json::from_str("{}").unwrap();
        assert!(query.is_empty());
    }
}
