//! Stage colours.

use super::PipelineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex colour in `#rgb` or `#rrggbb` form, kept in the case it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageColor(String);

impl StageColor {
    /// Creates a validated colour.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidStageColor`] unless the value is
    /// `#` followed by three or six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_owned();
        let is_valid = normalized.strip_prefix('#').is_some_and(|digits| {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        });
        if !is_valid {
            return Err(PipelineDomainError::InvalidStageColor(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the colour as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
