//! Client-side product form validation.
//!
//! Every check returns a human-readable message on failure and `None` on
//! success. The form-level functions run all checks and collect the messages
//! per field into [`FieldErrors`]; a submission is blocked when that map is
//! non-empty.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::api::ProductApi;
use crate::product::Product;

/// Minimum id length, in characters.
pub const ID_MIN_LEN: usize = 3;
/// Maximum id length, in characters.
pub const ID_MAX_LEN: usize = 10;
/// Minimum name length, in characters.
pub const NAME_MIN_LEN: usize = 5;
/// Maximum name length, in characters.
pub const NAME_MAX_LEN: usize = 100;
/// Minimum description length, in characters.
pub const DESCRIPTION_MIN_LEN: usize = 10;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// Message for an id outside the allowed length.
pub const ID_LENGTH_MESSAGE: &str = "ID must be between 3 and 10 characters.";
/// Message for an id the service already knows.
pub const ID_TAKEN_MESSAGE: &str = "ID already exists.";
/// Message when the id could not be checked against the service.
pub const ID_CHECK_FAILED_MESSAGE: &str = "Could not verify the ID.";
/// Message for a name outside the allowed length.
pub const NAME_LENGTH_MESSAGE: &str = "Name must be between 5 and 100 characters.";
/// Message for a description outside the allowed length.
pub const DESCRIPTION_LENGTH_MESSAGE: &str =
    "Description must be between 10 and 200 characters.";
/// Message for a blank logo.
pub const LOGO_REQUIRED_MESSAGE: &str = "Logo is required.";
/// Message for a release date in the past.
pub const RELEASE_DATE_MESSAGE: &str = "Release date must be today or later.";
/// Message for a revision date that is not one year after release.
pub const REVISION_DATE_MESSAGE: &str =
    "Revision date must be exactly one year after the release date.";

/// A validated product form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Product id.
    Id,
    /// Product name.
    Name,
    /// Product description.
    Description,
    /// Logo URL.
    Logo,
    /// Release date.
    DateRelease,
    /// Revision date.
    DateRevision,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Name => write!(f, "name"),
            Self::Description => write!(f, "description"),
            Self::Logo => write!(f, "logo"),
            Self::DateRelease => write!(f, "date_release"),
            Self::DateRevision => write!(f, "date_revision"),
        }
    }
}

/// Validation messages keyed by field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Record a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Record the outcome of a single check.
    pub fn check(&mut self, field: Field, outcome: Option<String>) {
        if let Some(message) = outcome {
            self.insert(field, message);
        }
    }

    /// Get the message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Check whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over failing fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "  {field}: {message}")?;
        }
        Ok(())
    }
}

fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

/// Check the id length.
#[must_use]
pub fn validate_id(id: &str) -> Option<String> {
    (!length_between(id, ID_MIN_LEN, ID_MAX_LEN)).then(|| ID_LENGTH_MESSAGE.to_string())
}

/// Check the id length, then ask the service whether it is already taken.
///
/// A failed round-trip is reported as a validation message, never an error.
pub async fn validate_new_id<A>(id: &str, api: &A) -> Option<String>
where
    A: ProductApi + ?Sized,
{
    if let Some(message) = validate_id(id) {
        return Some(message);
    }

    match api.verify_id(id).await {
        Ok(true) => Some(ID_TAKEN_MESSAGE.to_string()),
        Ok(false) => None,
        Err(e) => {
            warn!("id verification for '{}' failed: {}", id, e);
            Some(ID_CHECK_FAILED_MESSAGE.to_string())
        }
    }
}

/// Check the name length.
#[must_use]
pub fn validate_name(name: &str) -> Option<String> {
    (!length_between(name, NAME_MIN_LEN, NAME_MAX_LEN)).then(|| NAME_LENGTH_MESSAGE.to_string())
}

/// Check the description length.
#[must_use]
pub fn validate_description(description: &str) -> Option<String> {
    (!length_between(description, DESCRIPTION_MIN_LEN, DESCRIPTION_MAX_LEN))
        .then(|| DESCRIPTION_LENGTH_MESSAGE.to_string())
}

/// Check that the logo is not blank.
#[must_use]
pub fn validate_logo(logo: &str) -> Option<String> {
    logo.trim()
        .is_empty()
        .then(|| LOGO_REQUIRED_MESSAGE.to_string())
}

/// Check that the release date is not before `today`.
#[must_use]
pub fn validate_release_date(release: NaiveDate, today: NaiveDate) -> Option<String> {
    (release < today).then(|| RELEASE_DATE_MESSAGE.to_string())
}

/// Check that the revision date is exactly one year after release.
#[must_use]
pub fn validate_revision_date(revision: NaiveDate, release: NaiveDate) -> Option<String> {
    (revision != one_year_after(release)).then(|| REVISION_DATE_MESSAGE.to_string())
}

/// The same month and day in the following year.
///
/// 29 February has no counterpart in the next year and rolls over to 1 March.
#[must_use]
pub fn one_year_after(date: NaiveDate) -> NaiveDate {
    let year = date.year() + 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

/// Run every check that does not need the network.
fn validate_local(product: &Product, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check(Field::Name, validate_name(&product.name));
    errors.check(Field::Description, validate_description(&product.description));
    errors.check(Field::Logo, validate_logo(&product.logo));
    errors.check(
        Field::DateRelease,
        validate_release_date(product.date_release, today),
    );
    errors.check(
        Field::DateRevision,
        validate_revision_date(product.date_revision, product.date_release),
    );
    errors
}

/// Validate a product about to be created.
///
/// Includes the id uniqueness round-trip against the service.
pub async fn validate_new<A>(product: &Product, today: NaiveDate, api: &A) -> FieldErrors
where
    A: ProductApi + ?Sized,
{
    let mut errors = validate_local(product, today);
    errors.check(Field::Id, validate_new_id(&product.id, api).await);
    debug!(
        "validated new product '{}': {} field error(s)",
        product.id,
        errors.len()
    );
    errors
}

/// Validate an edited product. The id already exists, so only its length is checked.
#[must_use]
pub fn validate_existing(product: &Product, today: NaiveDate) -> FieldErrors {
    let mut errors = validate_local(product, today);
    errors.check(Field::Id, validate_id(&product.id));
    errors
}
