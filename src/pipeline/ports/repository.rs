//! Repository port for pipeline and stage persistence.

use crate::pipeline::domain::{Pipeline, PipelineId, Stage, StageId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pipeline repository operations.
pub type PipelineRepositoryResult<T> = Result<T, PipelineRepositoryError>;

/// Pipeline and stage persistence contract.
///
/// Listings are ordered by creation time, oldest first.
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    /// Stores a new pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::DuplicatePipeline`] when the
    /// identifier already exists.
    async fn store_pipeline(&self, pipeline: &Pipeline) -> PipelineRepositoryResult<()>;

    /// Finds a pipeline by identifier.
    async fn find_pipeline(&self, id: PipelineId) -> PipelineRepositoryResult<Option<Pipeline>>;

    /// Returns every pipeline.
    async fn list_pipelines(&self) -> PipelineRepositoryResult<Vec<Pipeline>>;

    /// Stores a new stage.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRepositoryError::DuplicateStage`] when the identifier
    /// already exists or [`PipelineRepositoryError::UnknownPipeline`] when the
    /// owning pipeline does not exist.
    async fn store_stage(&self, stage: &Stage) -> PipelineRepositoryResult<()>;

    /// Finds a stage by identifier.
    async fn find_stage(&self, id: StageId) -> PipelineRepositoryResult<Option<Stage>>;

    /// Returns stages, restricted to one pipeline when `pipeline_id` is set.
    async fn list_stages(
        &self,
        pipeline_id: Option<PipelineId>,
    ) -> PipelineRepositoryResult<Vec<Stage>>;
}

/// Errors returned by pipeline repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PipelineRepositoryError {
    /// A pipeline with the same identifier already exists.
    #[error("duplicate pipeline identifier: {0}")]
    DuplicatePipeline(PipelineId),

    /// A stage with the same identifier already exists.
    #[error("duplicate stage identifier: {0}")]
    DuplicateStage(StageId),

    /// The referenced pipeline does not exist.
    #[error("pipeline not found: {0}")]
    UnknownPipeline(PipelineId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PipelineRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
