//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record printed on ID cards.
//! - Enforce required-field presence before any persistence write.
//!
//! # Invariants
//! - `id` is stable and never reused for another student.
//! - Required text fields are non-blank after trimming.
//! - Wire field names stay camelCase to match the persisted JSON
//!   blobs and the CSV header vocabulary.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every student record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = Uuid;

/// Default school year applied when a form or CSV row leaves it blank.
pub const DEFAULT_SCHOOL_YEAR: &str = "2025-2026";

/// Validation error for student records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentValidationError {
    /// The nil UUID is reserved and never a valid student id.
    NilId,
    /// A required text field is empty or whitespace-only.
    MissingRequiredField {
        /// Wire name of the offending field.
        field: &'static str,
    },
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "student id must not be the nil uuid"),
            Self::MissingRequiredField { field } => {
                write!(f, "required field missing: {field}")
            }
        }
    }
}

impl Error for StudentValidationError {}

/// Canonical student record.
///
/// Optional fields model data the editor and CSV import may omit; the
/// card renderer falls back to sensible defaults for each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable internal ID used for selection, editing and deletion.
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// School-issued matriculation number. Distinct from `id`; the
    /// system does not enforce its uniqueness.
    pub matricule: String,
    /// Class/cohort label, e.g. `Terminale C`.
    pub class_name: String,
    /// School-year label, e.g. `2025-2026`.
    pub school_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_center: Option<String>,
    /// Photo reference (URL or data URI) shown on the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Explicit QR payload. When absent the card uses
    /// [`Student::qr_payload`]'s fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_data: Option<String>,
}

impl Student {
    /// Creates a new student with a generated stable ID.
    ///
    /// # Invariants
    /// - Optional fields are initialized to `None`.
    /// - The generated id is a fresh v4 UUID, distinct from all ids
    ///   produced by earlier calls.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        matricule: impl Into<String>,
        class_name: impl Into<String>,
        school_year: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            matricule: matricule.into(),
            class_name: class_name.into(),
            school_year: school_year.into(),
            birth_date: None,
            birth_place: None,
            exam_center: None,
            photo_url: None,
            qr_code_data: None,
        }
    }

    /// Creates a student with a caller-provided stable ID.
    ///
    /// Used by restore paths where identity already exists externally.
    ///
    /// # Errors
    /// Returns [`StudentValidationError::NilId`] for the nil UUID.
    pub fn with_id(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        matricule: impl Into<String>,
        class_name: impl Into<String>,
        school_year: impl Into<String>,
    ) -> Result<Self, StudentValidationError> {
        if id.is_nil() {
            return Err(StudentValidationError::NilId);
        }
        let mut student = Self::new(first_name, last_name, matricule, class_name, school_year);
        student.id = id;
        Ok(student)
    }

    /// Checks required-field presence.
    ///
    /// # Errors
    /// Returns the first missing required field, in declaration order.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.id.is_nil() {
            return Err(StudentValidationError::NilId);
        }
        for (field, value) in [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("matricule", self.matricule.as_str()),
            ("className", self.class_name.as_str()),
            ("schoolYear", self.school_year.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(StudentValidationError::MissingRequiredField { field });
            }
        }
        Ok(())
    }

    /// Returns the payload encoded in the card's QR code.
    ///
    /// Explicit `qr_code_data` wins; otherwise the card falls back to
    /// `"{matricule}-{last_name}"`.
    pub fn qr_payload(&self) -> String {
        match self.qr_code_data.as_deref() {
            Some(data) if !data.trim().is_empty() => data.to_string(),
            _ => format!("{}-{}", self.matricule, self.last_name),
        }
    }

    /// Returns the lowercase haystack used by roster search.
    ///
    /// Matches the UI filter: first name, last name and matricule
    /// joined with spaces.
    pub fn search_haystack(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.matricule).to_lowercase()
    }
}
