//! Stage entity.

use super::{PipelineId, StageColor, StageId, StageName};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A coloured column within one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    id: StageId,
    pipeline_id: PipelineId,
    name: StageName,
    color: StageColor,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStageData {
    /// Persisted stage identifier.
    pub id: StageId,
    /// Owning pipeline.
    pub pipeline_id: PipelineId,
    /// Persisted name.
    pub name: StageName,
    /// Persisted colour.
    pub color: StageColor,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Stage {
    /// Creates a new stage inside `pipeline_id`.
    ///
    /// The caller is responsible for checking that the pipeline exists.
    #[must_use]
    pub fn new(
        pipeline_id: PipelineId,
        name: StageName,
        color: StageColor,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = crate::timestamp::now(clock);
        Self {
            id: StageId::new(),
            pipeline_id,
            name,
            color,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a stage from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStageData) -> Self {
        Self {
            id: data.id,
            pipeline_id: data.pipeline_id,
            name: data.name,
            color: data.color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the stage identifier.
    #[must_use]
    pub const fn id(&self) -> StageId {
        self.id
    }

    /// Returns the owning pipeline.
    #[must_use]
    pub const fn pipeline_id(&self) -> PipelineId {
        self.pipeline_id
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn name(&self) -> &StageName {
        &self.name
    }

    /// Returns the stage colour.
    #[must_use]
    pub const fn color(&self) -> &StageColor {
        &self.color
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
