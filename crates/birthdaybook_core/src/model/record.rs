//! Birthday record domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted under the `aniversariantes` key.
//! - Turn raw form input (`RecordDraft`, `RecordPatch`) into validated records.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `name`, `email` and `birthdate` are always present on a stored record.
//! - `password` is opaque and never used for access control.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Wire format of `birthdate` values.
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier of one birthday record.
///
/// Generated as UUIDv7, so ids carry a millisecond timestamp plus random bits.
pub type RecordId = Uuid;

/// One birthday entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// Legacy free-form field kept for data compatibility.
    #[serde(default)]
    pub password: String,
    /// Only month/day drive occurrences; the year feeds age and display.
    pub birthdate: NaiveDate,
}

impl BirthdayRecord {
    /// Validates a draft and assigns the provided id.
    ///
    /// # Errors
    /// - Returns the first missing or malformed field found in the draft.
    pub fn from_draft(id: RecordId, draft: &RecordDraft) -> Result<Self, RecordValidationError> {
        if id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        Ok(Self {
            id,
            name: required_text(&draft.name, RecordField::Name)?,
            email: required_text(&draft.email, RecordField::Email)?,
            password: draft.password.clone(),
            birthdate: parse_birthdate(&draft.birthdate)?,
        })
    }

    /// Returns a copy with every supplied patch field applied.
    ///
    /// The receiver is left untouched so callers can discard the result when
    /// persistence fails.
    pub fn patched(&self, patch: &RecordPatch) -> Result<Self, RecordValidationError> {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = required_text(name, RecordField::Name)?;
        }
        if let Some(email) = &patch.email {
            next.email = required_text(email, RecordField::Email)?;
        }
        if let Some(password) = &patch.password {
            next.password = password.clone();
        }
        if let Some(birthdate) = &patch.birthdate {
            next.birthdate = parse_birthdate(birthdate)?;
        }
        Ok(next)
    }

    /// Checks invariants of a record read back from storage.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::Missing(RecordField::Name));
        }
        if self.email.trim().is_empty() {
            return Err(RecordValidationError::Missing(RecordField::Email));
        }
        Ok(())
    }

    /// Birthdate month, 1-based.
    pub fn birth_month(&self) -> u32 {
        self.birthdate.month()
    }

    /// Birthdate day of month, 1-based.
    pub fn birth_day(&self) -> u32 {
        self.birthdate.day()
    }

    /// Whether this record recurs on the given month/day.
    pub fn falls_on(&self, month: u32, day: u32) -> bool {
        self.birth_month() == month && self.birth_day() == day
    }
}

/// Raw input for creating a record, as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`.
    pub birthdate: String,
}

impl RecordDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        birthdate: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            birthdate: birthdate.into(),
        }
    }
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthdate: Option<String>,
}

impl RecordPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.birthdate.is_none()
    }
}

/// Record fields subject to required-value checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Name,
    Email,
    Birthdate,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Birthdate => "birthdate",
        }
    }
}

/// Validation failures for record input and persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NilId,
    Missing(RecordField),
    InvalidBirthdate(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
            Self::Missing(field) => write!(f, "{} is required", field.as_str()),
            Self::InvalidBirthdate(value) => {
                write!(f, "birthdate `{value}` is not a valid YYYY-MM-DD date")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Parses a `YYYY-MM-DD` birthdate, trimming surrounding whitespace.
pub fn parse_birthdate(value: &str) -> Result<NaiveDate, RecordValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::Missing(RecordField::Birthdate));
    }
    NaiveDate::parse_from_str(trimmed, BIRTHDATE_FORMAT)
        .map_err(|_| RecordValidationError::InvalidBirthdate(trimmed.to_string()))
}

fn required_text(value: &str, field: RecordField) -> Result<String, RecordValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}
