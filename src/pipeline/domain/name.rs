//! Validated pipeline and stage names.

use super::PipelineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for names, matching the `VARCHAR(255)` columns.
const MAX_NAME_LENGTH: usize = 255;

fn normalize(
    raw: &str,
    empty: PipelineDomainError,
    too_long: PipelineDomainError,
) -> Result<String, PipelineDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Trimmed, non-empty pipeline name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineName(String);

impl PipelineName {
    /// Creates a validated pipeline name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyPipelineName`] or
    /// [`PipelineDomainError::PipelineNameTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, PipelineDomainError> {
        normalize(
            value.as_ref(),
            PipelineDomainError::EmptyPipelineName,
            PipelineDomainError::PipelineNameTooLong,
        )
        .map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty stage name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageName(String);

impl StageName {
    /// Creates a validated stage name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyStageName`] or
    /// [`PipelineDomainError::StageNameTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, PipelineDomainError> {
        normalize(
            value.as_ref(),
            PipelineDomainError::EmptyStageName,
            PipelineDomainError::StageNameTooLong,
        )
        .map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
