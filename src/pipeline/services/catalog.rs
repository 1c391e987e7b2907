//! Service layer for creating and listing pipelines and stages.

use crate::pipeline::{
    domain::{
        Pipeline, PipelineDomainError, PipelineId, PipelineKind, PipelineName, Stage, StageColor,
        StageName,
    },
    ports::{PipelineRepository, PipelineRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePipelineRequest {
    name: String,
    type_alias: String,
}

impl CreatePipelineRequest {
    /// Creates a request from a name and a client-facing type alias.
    #[must_use]
    pub fn new(name: impl Into<String>, type_alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_alias: type_alias.into(),
        }
    }
}

/// Request payload for creating a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStageRequest {
    pipeline_id: PipelineId,
    name: String,
    color: String,
}

impl CreateStageRequest {
    /// Creates a request for a stage inside `pipeline_id`.
    #[must_use]
    pub fn new(pipeline_id: PipelineId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            pipeline_id,
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Service-level errors for pipeline catalog operations.
#[derive(Debug, Error)]
pub enum PipelineCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PipelineDomainError),
    /// The referenced pipeline does not exist.
    #[error("pipeline not found: {0}")]
    PipelineNotFound(PipelineId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PipelineRepositoryError),
}

/// Result type for pipeline catalog operations.
pub type PipelineCatalogResult<T> = Result<T, PipelineCatalogError>;

/// Pipeline and stage orchestration service.
pub struct PipelineCatalogService<R, C>
where
    R: PipelineRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> PipelineCatalogService<R, C>
where
    R: PipelineRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new pipeline catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pipeline, resolving the type alias to its internal kind.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineCatalogError::Domain`] when the name or type is
    /// invalid, or [`PipelineCatalogError::Repository`] when persistence
    /// fails.
    pub async fn create_pipeline(
        &self,
        request: CreatePipelineRequest,
    ) -> PipelineCatalogResult<Pipeline> {
        let name = PipelineName::new(&request.name)?;
        let kind = PipelineKind::from_alias(&request.type_alias)?;

        let pipeline = Pipeline::new(name, kind, &*self.clock);
        self.repository.store_pipeline(&pipeline).await?;
        tracing::info!(pipeline_id = %pipeline.id(), kind = %kind, "created pipeline");
        Ok(pipeline)
    }

    /// Finds a pipeline by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineCatalogError::Repository`] when the lookup fails.
    pub async fn find_pipeline(&self, id: PipelineId) -> PipelineCatalogResult<Option<Pipeline>> {
        Ok(self.repository.find_pipeline(id).await?)
    }

    /// Returns every pipeline, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineCatalogError::Repository`] when the lookup fails.
    pub async fn list_pipelines(&self) -> PipelineCatalogResult<Vec<Pipeline>> {
        Ok(self.repository.list_pipelines().await?)
    }

    /// Creates a stage inside an existing pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineCatalogError::PipelineNotFound`] when the pipeline
    /// does not exist, [`PipelineCatalogError::Domain`] when the name or
    /// colour is invalid, or [`PipelineCatalogError::Repository`] when
    /// persistence fails.
    pub async fn create_stage(&self, request: CreateStageRequest) -> PipelineCatalogResult<Stage> {
        let CreateStageRequest {
            pipeline_id,
            name,
            color,
        } = request;

        let stage_name = StageName::new(&name)?;
        let stage_color = StageColor::new(color)?;
        if self.repository.find_pipeline(pipeline_id).await?.is_none() {
            return Err(PipelineCatalogError::PipelineNotFound(pipeline_id));
        }

        let stage = Stage::new(pipeline_id, stage_name, stage_color, &*self.clock);
        self.repository
            .store_stage(&stage)
            .await
            .map_err(|err| match err {
                PipelineRepositoryError::UnknownPipeline(id) => {
                    PipelineCatalogError::PipelineNotFound(id)
                }
                other => other.into(),
            })?;
        tracing::info!(stage_id = %stage.id(), %pipeline_id, "created stage");
        Ok(stage)
    }

    /// Returns stages, restricted to one pipeline when `pipeline_id` is set.
    ///
    /// An unknown pipeline simply yields no stages.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineCatalogError::Repository`] when the lookup fails.
    pub async fn list_stages(
        &self,
        pipeline_id: Option<PipelineId>,
    ) -> PipelineCatalogResult<Vec<Stage>> {
        Ok(self.repository.list_stages(pipeline_id).await?)
    }
}
