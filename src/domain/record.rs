//! Application record domain model.
//!
//! [`ApplicationRecord`] is owned by the remote record store; this crate only reads
//! it. Field names on the wire follow the store's JSON export (`_id`,
//! `date_of_applying`, `link_type`, `email_or_portal`), while the Rust names follow
//! what the fields mean to the list view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque unique identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Where an application currently stands.
///
/// Serialized with the store's display labels (`"Not Hiring"`, `"Followed up"`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    #[serde(rename = "Not Hiring")]
    NotHiring,
    Rejected,
    Accepted,
    #[serde(rename = "Followed up")]
    FollowedUp,
}

impl ApplicationStatus {
    /// Every status, in the order the filter dialog lists them.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::NotHiring,
        Self::Rejected,
        Self::Accepted,
        Self::FollowedUp,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::NotHiring => "Not Hiring",
            Self::Rejected => "Rejected",
            Self::Accepted => "Accepted",
            Self::FollowedUp => "Followed up",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    /// Parses a status label leniently: case, spaces, `-` and `_` are ignored, so
    /// `"Not Hiring"`, `"not-hiring"` and `"NotHiring"` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|status| {
                status
                    .label()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .eq(key.chars())
            })
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,

    pub company_name: String,

    #[serde(rename = "date_of_applying", alias = "applied_on", with = "applied_date")]
    pub applied_on: NaiveDate,

    #[serde(default)]
    pub status: ApplicationStatus,

    /// Free-form channel such as "email", "job portal" or "other".
    #[serde(rename = "link_type", alias = "application_type", default)]
    pub application_type: Option<String>,

    #[serde(rename = "email_or_portal", alias = "contact", default)]
    pub contact: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ApplicationRecord {
    /// Creates a pending record with no optional fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use jobtrail::domain::{ApplicationRecord, ApplicationStatus};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    /// let record = ApplicationRecord::new("1", "ACME Corp", date)
    ///     .with_status(ApplicationStatus::Accepted)
    ///     .with_type("email");
    /// assert_eq!(record.application_type.as_deref(), Some("email"));
    /// ```
    pub fn new(id: impl Into<RecordId>, company_name: impl Into<String>, applied_on: NaiveDate) -> Self {
        Self {
            id: id.into(),
            company_name: company_name.into(),
            applied_on,
            status: ApplicationStatus::Pending,
            application_type: None,
            contact: None,
            notes: None,
            link: None,
            photo_url: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_type(mut self, application_type: impl Into<String>) -> Self {
        self.application_type = Some(application_type.into());
        self
    }

    #[must_use]
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Calendar-date codec for `date_of_applying`.
///
/// The store exports either a bare `YYYY-MM-DD` or an ISO date-time
/// (`2024-01-15T10:30:00`, optionally with an offset). Only the date part is kept.
mod applied_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let date_part = raw.get(..10)?;
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }
}
