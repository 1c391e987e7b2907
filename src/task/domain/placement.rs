//! Task placements into pipelines and stages.

use super::TaskDomainError;
use crate::pipeline::domain::{PipelineId, StageId};
use std::collections::HashSet;

/// Places a task into a pipeline, optionally in one of its stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pipeline_id: PipelineId,
    stage_id: Option<StageId>,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(pipeline_id: PipelineId, stage_id: Option<StageId>) -> Self {
        Self {
            pipeline_id,
            stage_id,
        }
    }

    /// Returns the pipeline.
    #[must_use]
    pub const fn pipeline_id(&self) -> PipelineId {
        self.pipeline_id
    }

    /// Returns the stage, when one is assigned.
    #[must_use]
    pub const fn stage_id(&self) -> Option<StageId> {
        self.stage_id
    }
}

/// The set of placements of one task, at most one per pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placements(Vec<Placement>);

impl Placements {
    /// Creates a placement set, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicatePlacement`] when a pipeline
    /// appears more than once.
    pub fn new(placements: Vec<Placement>) -> Result<Self, TaskDomainError> {
        let mut seen = HashSet::with_capacity(placements.len());
        if let Some(repeated) = placements
            .iter()
            .find(|placement| !seen.insert(placement.pipeline_id))
        {
            return Err(TaskDomainError::DuplicatePlacement(repeated.pipeline_id));
        }
        Ok(Self(placements))
    }

    /// Returns the placements in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Placement] {
        &self.0
    }

    /// Returns `true` when the task is placed into `pipeline_id`.
    #[must_use]
    pub fn contains_pipeline(&self, pipeline_id: PipelineId) -> bool {
        self.0
            .iter()
            .any(|placement| placement.pipeline_id == pipeline_id)
    }

    /// Returns `true` when the task sits in `stage_id`.
    #[must_use]
    pub fn contains_stage(&self, stage_id: StageId) -> bool {
        self.0
            .iter()
            .any(|placement| placement.stage_id == Some(stage_id))
    }
}
