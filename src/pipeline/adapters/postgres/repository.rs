//! `PostgreSQL` repository implementation for pipelines and stages.

use super::{
    models::{NewPipelineRow, NewStageRow, PipelineRow, StageRow},
    schema::{pipelines, stages},
};
use crate::db::PgPool;
use crate::pipeline::{
    domain::{
        PersistedPipelineData, PersistedStageData, Pipeline, PipelineId, PipelineKind,
        PipelineName, Stage, StageColor, StageId, StageName,
    },
    ports::{PipelineRepository, PipelineRepositoryError, PipelineRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed pipeline repository.
#[derive(Debug, Clone)]
pub struct PostgresPipelineRepository {
    pool: PgPool,
}

impl PostgresPipelineRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PipelineRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PipelineRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PipelineRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PipelineRepositoryError::persistence)?
    }
}

#[async_trait]
impl PipelineRepository for PostgresPipelineRepository {
    async fn store_pipeline(&self, pipeline: &Pipeline) -> PipelineRepositoryResult<()> {
        let pipeline_id = pipeline.id();
        let new_row = NewPipelineRow {
            id: pipeline_id.into_inner(),
            name: pipeline.name().as_str().to_owned(),
            kind: pipeline.kind().code(),
            created_at: pipeline.created_at(),
            updated_at: pipeline.updated_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(pipelines::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PipelineRepositoryError::DuplicatePipeline(pipeline_id)
                    }
                    _ => PipelineRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_pipeline(&self, id: PipelineId) -> PipelineRepositoryResult<Option<Pipeline>> {
        self.run_blocking(move |connection| {
            let row = pipelines::table
                .filter(pipelines::id.eq(id.into_inner()))
                .select(PipelineRow::as_select())
                .first::<PipelineRow>(connection)
                .optional()
                .map_err(PipelineRepositoryError::persistence)?;
            row.map(row_to_pipeline).transpose()
        })
        .await
    }

    async fn list_pipelines(&self) -> PipelineRepositoryResult<Vec<Pipeline>> {
        self.run_blocking(move |connection| {
            let rows = pipelines::table
                .order((pipelines::created_at.asc(), pipelines::id.asc()))
                .select(PipelineRow::as_select())
                .load::<PipelineRow>(connection)
                .map_err(PipelineRepositoryError::persistence)?;
            rows.into_iter().map(row_to_pipeline).collect()
        })
        .await
    }

    async fn store_stage(&self, stage: &Stage) -> PipelineRepositoryResult<()> {
        let stage_id = stage.id();
        let pipeline_id = stage.pipeline_id();
        let new_row = NewStageRow {
            id: stage_id.into_inner(),
            pipeline_id: pipeline_id.into_inner(),
            name: stage.name().as_str().to_owned(),
            color: stage.color().as_str().to_owned(),
            created_at: stage.created_at(),
            updated_at: stage.updated_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(stages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PipelineRepositoryError::DuplicateStage(stage_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        PipelineRepositoryError::UnknownPipeline(pipeline_id)
                    }
                    _ => PipelineRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_stage(&self, id: StageId) -> PipelineRepositoryResult<Option<Stage>> {
        self.run_blocking(move |connection| {
            let row = stages::table
                .filter(stages::id.eq(id.into_inner()))
                .select(StageRow::as_select())
                .first::<StageRow>(connection)
                .optional()
                .map_err(PipelineRepositoryError::persistence)?;
            row.map(row_to_stage).transpose()
        })
        .await
    }

    async fn list_stages(
        &self,
        pipeline_id: Option<PipelineId>,
    ) -> PipelineRepositoryResult<Vec<Stage>> {
        self.run_blocking(move |connection| {
            let mut query = stages::table
                .order((stages::created_at.asc(), stages::id.asc()))
                .select(StageRow::as_select())
                .into_boxed();
            if let Some(id) = pipeline_id {
                query = query.filter(stages::pipeline_id.eq(id.into_inner()));
            }
            let rows = query
                .load::<StageRow>(connection)
                .map_err(PipelineRepositoryError::persistence)?;
            rows.into_iter().map(row_to_stage).collect()
        })
        .await
    }
}

fn row_to_pipeline(row: PipelineRow) -> PipelineRepositoryResult<Pipeline> {
    let PipelineRow {
        id,
        name,
        kind,
        created_at,
        updated_at,
    } = row;

    let parsed_name =
        PipelineName::new(&name).map_err(PipelineRepositoryError::invalid_persisted_data)?;
    let parsed_kind =
        PipelineKind::try_from(kind).map_err(PipelineRepositoryError::invalid_persisted_data)?;

    Ok(Pipeline::from_persisted(PersistedPipelineData {
        id: PipelineId::from_uuid(id),
        name: parsed_name,
        kind: parsed_kind,
        created_at,
        updated_at,
    }))
}

fn row_to_stage(row: StageRow) -> PipelineRepositoryResult<Stage> {
    let StageRow {
        id,
        pipeline_id,
        name,
        color,
        created_at,
        updated_at,
    } = row;

    let parsed_name =
        StageName::new(&name).map_err(PipelineRepositoryError::invalid_persisted_data)?;
    let parsed_color =
        StageColor::new(color).map_err(PipelineRepositoryError::invalid_persisted_data)?;

    Ok(Stage::from_persisted(PersistedStageData {
        id: StageId::from_uuid(id),
        pipeline_id: PipelineId::from_uuid(pipeline_id),
        name: parsed_name,
        color: parsed_color,
        created_at,
        updated_at,
    }))
}
