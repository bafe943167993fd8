//! Core product types for fincatalog.
//!
//! This module defines the financial-product record exchanged with the remote
//! catalog service and cached locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A financial product in the remote catalog.
///
/// Field names match the service's JSON representation exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier, immutable after creation.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// URL of the product logo.
    pub logo: String,

    /// Date the product is released.
    #[serde(with = "calendar_date")]
    pub date_release: NaiveDate,

    /// Date the product is next reviewed (one year after release).
    #[serde(with = "calendar_date")]
    pub date_revision: NaiveDate,
}

impl Product {
    /// Apply a set of edits, leaving the id untouched.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(logo) = changes.logo {
            self.logo = logo;
        }
        if let Some(date_release) = changes.date_release {
            self.date_release = date_release;
        }
        if let Some(date_revision) = changes.date_revision {
            self.date_revision = date_revision;
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Edits to an existing product. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New logo URL.
    pub logo: Option<String>,
    /// New release date.
    pub date_release: Option<NaiveDate>,
    /// New revision date.
    pub date_revision: Option<NaiveDate>,
}

impl ProductChanges {
    /// Check whether any field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.logo.is_none()
            && self.date_release.is_none()
            && self.date_revision.is_none()
    }
}

/// Serde codec for calendar dates.
///
/// Writes `YYYY-MM-DD`. Reads either `YYYY-MM-DD` or an ISO-8601 date-time,
/// keeping only the leading calendar date.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Wire format for dates.
    pub const FORMAT: &str = "%Y-%m-%d";

    /// Parse a date, accepting a trailing time component.
    ///
    /// # Errors
    ///
    /// Returns an error if the leading ten characters are not a valid date.
    pub fn parse(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        let trimmed = value.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, FORMAT)
    }

    /// Serialize a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    /// Deserialize a date from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string holding a valid date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid date '{raw}': {e}")))
    }
}
