//! In-memory pipeline repository for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::pipeline::{
    domain::{Pipeline, PipelineId, Stage, StageId},
    ports::{PipelineRepository, PipelineRepositoryError, PipelineRepositoryResult},
};

/// Thread-safe in-memory pipeline repository.
///
/// Records are kept in insertion order, which doubles as creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPipelineRepository {
    state: Arc<RwLock<InMemoryPipelineState>>,
}

#[derive(Debug, Default)]
struct InMemoryPipelineState {
    pipelines: Vec<Pipeline>,
    stages: Vec<Stage>,
}

impl InMemoryPipelineRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&InMemoryPipelineState) -> T,
    ) -> PipelineRepositoryResult<T> {
        let state = self.state.read().map_err(|err| {
            PipelineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(f(&state))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut InMemoryPipelineState) -> PipelineRepositoryResult<T>,
    ) -> PipelineRepositoryResult<T> {
        let mut state = self.state.write().map_err(|err| {
            PipelineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        f(&mut state)
    }
}

#[async_trait]
impl PipelineRepository for InMemoryPipelineRepository {
    async fn store_pipeline(&self, pipeline: &Pipeline) -> PipelineRepositoryResult<()> {
        self.write(|state| {
            if state.pipelines.iter().any(|p| p.id() == pipeline.id()) {
                return Err(PipelineRepositoryError::DuplicatePipeline(pipeline.id()));
            }
            state.pipelines.push(pipeline.clone());
            Ok(())
        })
    }

    async fn find_pipeline(&self, id: PipelineId) -> PipelineRepositoryResult<Option<Pipeline>> {
        self.read(|state| state.pipelines.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_pipelines(&self) -> PipelineRepositoryResult<Vec<Pipeline>> {
        self.read(|state| state.pipelines.clone())
    }

    async fn store_stage(&self, stage: &Stage) -> PipelineRepositoryResult<()> {
        self.write(|state| {
            if state.stages.iter().any(|s| s.id() == stage.id()) {
                return Err(PipelineRepositoryError::DuplicateStage(stage.id()));
            }
            if !state.pipelines.iter().any(|p| p.id() == stage.pipeline_id()) {
                return Err(PipelineRepositoryError::UnknownPipeline(stage.pipeline_id()));
            }
            state.stages.push(stage.clone());
            Ok(())
        })
    }

    async fn find_stage(&self, id: StageId) -> PipelineRepositoryResult<Option<Stage>> {
        self.read(|state| state.stages.iter().find(|s| s.id() == id).cloned())
    }

    async fn list_stages(
        &self,
        pipeline_id: Option<PipelineId>,
    ) -> PipelineRepositoryResult<Vec<Stage>> {
        self.read(|state| {
            state
                .stages
                .iter()
                .filter(|stage| pipeline_id.is_none_or(|id| stage.pipeline_id() == id))
                .cloned()
                .collect()
        })
    }
}
