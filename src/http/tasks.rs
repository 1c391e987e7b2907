//! `/api/tasks` handlers.

use super::{
    auth::AuthenticatedUser,
    error::{ApiError, FieldErrors},
    pagination::{PageLinks, PageMeta},
    resources::TaskResource,
    state::AppState,
};
use crate::paging::{DEFAULT_PER_PAGE, PageRequest, PageRequestError};
use crate::pipeline::domain::{PipelineId, StageId};
use crate::task::{
    domain::{CheckboxId, Placement, TaskId, TaskStatus},
    ports::TaskFilter,
    services::{CheckboxEditRequest, CreateTaskRequest, UpdateTaskRequest},
};
use crate::user::domain::UserId;
use axum::Json;
use axum::extract::{
    OriginalUri, Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(super) struct TaskListQuery {
    page: Option<String>,
    per_page: Option<String>,
    pipeline_id: Option<String>,
    stage_id: Option<String>,
    user_id: Option<String>,
    status: Option<String>,
}

// Fields stay loose so that a value of the wrong type is reported against
// its own key.
#[derive(Debug, Deserialize)]
pub(super) struct CreateTaskBody {
    name: Option<Value>,
    user_id: Option<Value>,
    position: Option<Value>,
    checkboxes: Option<Value>,
    pipelines: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateTaskBody {
    name: Option<Value>,
    user_id: Option<Value>,
    status: Option<Value>,
    position: Option<Value>,
    start_at: Option<Value>,
    end_at: Option<Value>,
    checkboxes: Option<Value>,
    pipelines: Option<Value>,
}

/// Task listings carry no `success` key.
#[derive(Debug, Serialize)]
pub(super) struct TaskList {
    tasks: Vec<TaskResource>,
    meta: PageMeta,
    links: PageLinks,
}

#[derive(Debug, Serialize)]
pub(super) struct TaskEnvelope {
    success: bool,
    task: TaskResource,
}

#[derive(Debug, Serialize)]
pub(super) struct Deleted {
    success: bool,
}

pub(super) async fn index(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<TaskList>, ApiError> {
    let Query(params) = query?;
    let mut errors = FieldErrors::new();

    let number = errors.query_number("page", params.page.as_deref());
    let size = errors.query_number("per_page", params.per_page.as_deref());
    let page = PageRequest::new(number.unwrap_or(1), size.unwrap_or(DEFAULT_PER_PAGE))
        .unwrap_or_else(|err| {
            let field = match err {
                PageRequestError::InvalidPage(_) => "page",
                PageRequestError::InvalidPerPage(_) => "per_page",
            };
            errors.add(field, err.to_string());
            PageRequest::default()
        });

    let mut filter = TaskFilter::new();
    if let Some(raw) = params.pipeline_id.as_deref() {
        filter = filter.with_pipeline(PipelineId::from_uuid(errors.id("pipeline_id", raw)));
    }
    if let Some(raw) = params.stage_id.as_deref() {
        filter = filter.with_stage(StageId::from_uuid(errors.id("stage_id", raw)));
    }
    if let Some(raw) = params.user_id.as_deref() {
        filter = filter.with_owner(UserId::from_uuid(errors.id("user_id", raw)));
    }
    if let Some(raw) = params.status.as_deref() {
        match TaskStatus::parse(raw) {
            Ok(status) => filter = filter.with_status(status),
            Err(err) => errors.add("status", err.to_string()),
        }
    }
    errors.finish()?;

    let listed = state.tasks().list(&filter, page).await?;
    let path = uri.path();
    Ok(Json(TaskList {
        meta: PageMeta::describe(&listed, path),
        links: PageLinks::around(&listed, path),
        tasks: listed.items().iter().map(TaskResource::from).collect(),
    }))
}

pub(super) async fn store(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let Json(body) = payload?;
    let mut errors = FieldErrors::new();
    let name = errors.required_string("name", body.name);
    let owner = errors
        .optional_id("user_id", body.user_id)
        .map(UserId::from_uuid);
    let position = errors.integer("position", body.position);
    let lines = errors
        .array("checkboxes", body.checkboxes)
        .map(|items| descriptions(&mut errors, items))
        .unwrap_or_default();
    let placements = errors
        .array("pipelines", body.pipelines)
        .map(|entries| placements(&mut errors, entries))
        .unwrap_or_default();
    errors.finish()?;

    let mut request = CreateTaskRequest::new(name)
        .with_checkboxes(lines)
        .with_placements(placements);
    if let Some(owner_id) = owner {
        request = request.with_owner(owner_id);
    }
    if let Some(slot) = position {
        request = request.with_position(slot);
    }

    let created = state.tasks().create(user.id(), request).await?;
    Ok(Json(TaskEnvelope {
        success: true,
        task: TaskResource::from(&created),
    }))
}

pub(super) async fn show(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let id = task_id(&raw_id)?;
    let found = state
        .tasks()
        .find(id)
        .await?
        .ok_or_else(task_not_found)?;
    Ok(Json(TaskEnvelope {
        success: true,
        task: TaskResource::from(&found),
    }))
}

pub(super) async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let id = task_id(&raw_id)?;
    let Json(body) = payload?;
    let mut errors = FieldErrors::new();
    let name = errors.required_string("name", body.name);
    let owner_id = UserId::from_uuid(errors.required_id("user_id", body.user_id));
    let status = errors.required_string("status", body.status);
    let position = errors.required_integer("position", body.position);
    let start_at = errors.string("start_at", body.start_at);
    let end_at = errors.string("end_at", body.end_at);
    let checkboxes = errors
        .array("checkboxes", body.checkboxes)
        .map(|lines| checkbox_edits(&mut errors, lines));
    let replacement = errors
        .array("pipelines", body.pipelines)
        .map(|entries| placements(&mut errors, entries));
    errors.finish()?;

    let mut request = UpdateTaskRequest::new(name, owner_id, status, position)
        .with_schedule(start_at, end_at);
    if let Some(edits) = checkboxes {
        request = request.with_checkboxes(edits);
    }
    if let Some(entries) = replacement {
        request = request.with_placements(entries);
    }

    let updated = state.tasks().update(id, request).await?;
    Ok(Json(TaskEnvelope {
        success: true,
        task: TaskResource::from(&updated),
    }))
}

pub(super) async fn destroy(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let id = task_id(&raw_id)?;
    state.tasks().delete(id).await?;
    Ok(Json(Deleted { success: true }))
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found.".to_owned())
}

fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    Uuid::parse_str(raw)
        .map(TaskId::from_uuid)
        .map_err(|_| task_not_found())
}

fn descriptions(errors: &mut FieldErrors, items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| errors.required_string(&format!("checkboxes.{index}"), Some(item)))
        .collect()
}

fn placements(errors: &mut FieldErrors, entries: Vec<Value>) -> Vec<Placement> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let mut fields = errors.object(&format!("pipelines.{index}"), entry)?;
            let pipeline_id = errors.required_id(
                &format!("pipelines.{index}.pipeline_id"),
                fields.remove("pipeline_id"),
            );
            let stage_id = errors
                .optional_id(&format!("pipelines.{index}.stage_id"), fields.remove("stage_id"))
                .map(StageId::from_uuid);
            Some(Placement::new(PipelineId::from_uuid(pipeline_id), stage_id))
        })
        .collect()
}

fn checkbox_edits(errors: &mut FieldErrors, lines: Vec<Value>) -> Vec<CheckboxEditRequest> {
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let mut fields = errors.object(&format!("checkboxes.{index}"), line)?;
            let id = errors
                .optional_id(&format!("checkboxes.{index}.id"), fields.remove("id"))
                .map(CheckboxId::from_uuid);
            let description = errors.required_string(
                &format!("checkboxes.{index}.description"),
                fields.remove("description"),
            );
            let is_checked = errors
                .boolean(&format!("checkboxes.{index}.is_checked"), fields.remove("is_checked"))
                .unwrap_or(false);
            Some(CheckboxEditRequest::from_parts(id, description, is_checked))
        })
        .collect()
}
