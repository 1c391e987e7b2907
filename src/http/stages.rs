//! `/api/stages` handlers.

use super::{
    auth::AuthenticatedUser,
    error::{ApiError, FieldErrors},
    resources::StageResource,
    state::AppState,
};
use crate::pipeline::{domain::PipelineId, services::CreateStageRequest};
use axum::Json;
use axum::extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct StageListQuery {
    pipeline_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateStageBody {
    name: Option<Value>,
    color: Option<Value>,
    pipeline_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct StageList {
    success: bool,
    stages: Vec<StageResource>,
}

#[derive(Debug, Serialize)]
pub(super) struct StageEnvelope {
    success: bool,
    stage: StageResource,
}

pub(super) async fn index(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    query: Result<Query<StageListQuery>, QueryRejection>,
) -> Result<Json<StageList>, ApiError> {
    let Query(params) = query?;
    let mut errors = FieldErrors::new();
    let pipeline_id = params
        .pipeline_id
        .as_deref()
        .map(|raw| PipelineId::from_uuid(errors.id("pipeline_id", raw)));
    errors.finish()?;

    let stages = state.pipelines().list_stages(pipeline_id).await?;
    Ok(Json(StageList {
        success: true,
        stages: stages.iter().map(StageResource::from).collect(),
    }))
}

pub(super) async fn store(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    payload: Result<Json<CreateStageBody>, JsonRejection>,
) -> Result<Json<StageEnvelope>, ApiError> {
    let Json(body) = payload?;
    let mut errors = FieldErrors::new();
    let name = errors.required_string("name", body.name);
    let color = errors.required_string("color", body.color);
    let pipeline_id = errors.required_id("pipeline_id", body.pipeline_id);
    errors.finish()?;

    let stage = state
        .pipelines()
        .create_stage(CreateStageRequest::new(
            PipelineId::from_uuid(pipeline_id),
            name,
            color,
        ))
        .await?;
    Ok(Json(StageEnvelope {
        success: true,
        stage: StageResource::from(&stage),
    }))
}
