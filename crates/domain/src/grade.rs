//! Grade — a student name paired with the grade they received.

use serde::{Deserialize, Serialize};

use crate::error::{GradebookError, ValidationError};
use crate::id::GradeId;

/// A persisted grade record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub name: String,
    pub grade: String,
}

/// Client-supplied fields for creating or replacing a grade.
///
/// Both fields are optional so that a missing field and an empty field are
/// rejected the same way by [`GradeDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDraft {
    pub name: Option<String>,
    pub grade: Option<String>,
}

impl GradeDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            grade: Some(grade.into()),
        }
    }

    /// Check that both fields are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), GradebookError> {
        require("name", self.name.as_deref())?;
        require("grade", self.grade.as_deref())?;
        Ok(())
    }

    /// Validate and attach a store-allocated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::Validation`] if `name` or `grade` is missing
    /// or empty.
    pub fn into_grade(self, id: GradeId) -> Result<Grade, GradebookError> {
        self.validate()?;
        Ok(Grade {
            id,
            name: self.name.unwrap_or_default(),
            grade: self.grade.unwrap_or_default(),
        })
    }
}

fn require(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(ValidationError::MissingField { field }),
    }
}
