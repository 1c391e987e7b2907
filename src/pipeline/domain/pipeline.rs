//! Pipeline aggregate root.

use super::{PipelineId, PipelineKind, PipelineName};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A named workflow template that tasks can be placed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    id: PipelineId,
    name: PipelineName,
    kind: PipelineKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPipelineData {
    /// Persisted pipeline identifier.
    pub id: PipelineId,
    /// Persisted name.
    pub name: PipelineName,
    /// Persisted type classification.
    pub kind: PipelineKind,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Pipeline {
    /// Creates a new pipeline.
    #[must_use]
    pub fn new(name: PipelineName, kind: PipelineKind, clock: &impl Clock) -> Self {
        let timestamp = crate::timestamp::now(clock);
        Self {
            id: PipelineId::new(),
            name,
            kind,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a pipeline from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPipelineData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            kind: data.kind,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the pipeline identifier.
    #[must_use]
    pub const fn id(&self) -> PipelineId {
        self.id
    }

    /// Returns the pipeline name.
    #[must_use]
    pub const fn name(&self) -> &PipelineName {
        &self.name
    }

    /// Returns the pipeline type.
    #[must_use]
    pub const fn kind(&self) -> PipelineKind {
        self.kind
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
