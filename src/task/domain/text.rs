//! Validated free-text values carried by tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TEXT_LENGTH: usize = 255;

/// Trimmed, non-empty task name of at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] or
    /// [`TaskDomainError::TaskNameTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        if trimmed.chars().count() > MAX_TEXT_LENGTH {
            return Err(TaskDomainError::TaskNameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checklist line text.
///
/// Surrounding whitespace is kept so that descriptions round-trip exactly;
/// only blank text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckboxDescription(String);

impl CheckboxDescription {
    /// Creates a validated checkbox description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCheckboxDescription`] or
    /// [`TaskDomainError::CheckboxDescriptionTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptyCheckboxDescription);
        }
        if text.chars().count() > MAX_TEXT_LENGTH {
            return Err(TaskDomainError::CheckboxDescriptionTooLong);
        }
        Ok(Self(text))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckboxDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
