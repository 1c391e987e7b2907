//! Pipeline type classification.

use super::{ParsePipelineKindError, PipelineDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of work a pipeline organises.
///
/// Clients see the lowercase alias; storage keeps a stable numeric code so
/// aliases can be renamed without a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    /// General task board.
    Task,
    /// Sales deals.
    Deal,
    /// Sales leads.
    Lead,
    /// Project delivery.
    Project,
}

impl PipelineKind {
    /// Every kind, in storage-code order.
    pub const ALL: [Self; 4] = [Self::Task, Self::Deal, Self::Lead, Self::Project];

    /// Returns the client-facing alias.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Deal => "deal",
            Self::Lead => "lead",
            Self::Project => "project",
        }
    }

    /// Returns the internal storage code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Task => 1,
            Self::Deal => 2,
            Self::Lead => 3,
            Self::Project => 4,
        }
    }

    /// Resolves a client-facing alias.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::UnknownPipelineType`] for unknown
    /// aliases.
    pub fn from_alias(alias: &str) -> Result<Self, PipelineDomainError> {
        let normalized = alias.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.alias() == normalized)
            .ok_or_else(|| PipelineDomainError::UnknownPipelineType(alias.to_owned()))
    }
}

impl TryFrom<i16> for PipelineKind {
    type Error = ParsePipelineKindError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(ParsePipelineKindError(code))
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}
