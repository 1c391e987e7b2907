//! `/api/pipelines` handlers.

use super::{
    auth::AuthenticatedUser,
    error::{ApiError, FieldErrors},
    resources::PipelineResource,
    state::AppState,
};
use crate::pipeline::{domain::PipelineId, services::CreatePipelineRequest};
use axum::Json;
use axum::extract::{Path, State, rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(super) struct CreatePipelineBody {
    name: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct PipelineList {
    success: bool,
    pipelines: Vec<PipelineResource>,
}

#[derive(Debug, Serialize)]
pub(super) struct PipelineEnvelope {
    success: bool,
    pipeline: PipelineResource,
}

pub(super) async fn index(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<PipelineList>, ApiError> {
    let pipelines = state.pipelines().list_pipelines().await?;
    Ok(Json(PipelineList {
        success: true,
        pipelines: pipelines.iter().map(PipelineResource::from).collect(),
    }))
}

pub(super) async fn store(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    payload: Result<Json<CreatePipelineBody>, JsonRejection>,
) -> Result<Json<PipelineEnvelope>, ApiError> {
    let Json(body) = payload?;
    let mut errors = FieldErrors::new();
    let name = errors.required_string("name", body.name);
    let kind = errors.required_string("type", body.kind);
    errors.finish()?;

    let pipeline = state
        .pipelines()
        .create_pipeline(CreatePipelineRequest::new(name, kind))
        .await?;
    Ok(Json(PipelineEnvelope {
        success: true,
        pipeline: PipelineResource::from(&pipeline),
    }))
}

pub(super) async fn show(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> Result<Json<PipelineEnvelope>, ApiError> {
    let not_found = || ApiError::NotFound("Pipeline not found.".to_owned());
    let id = Uuid::parse_str(&raw_id)
        .map(PipelineId::from_uuid)
        .map_err(|_| not_found())?;
    let pipeline = state
        .pipelines()
        .find_pipeline(id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(PipelineEnvelope {
        success: true,
        pipeline: PipelineResource::from(&pipeline),
    }))
}
