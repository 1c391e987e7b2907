//! Wire representations of domain records.

use crate::pipeline::domain::{Pipeline, PipelineId, Stage, StageId};
use crate::task::domain::{CheckboxId, TaskId, TaskStatus};
use crate::task::services::TaskDetails;
use crate::user::domain::{User, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A pipeline; `type` is the client-facing alias.
#[derive(Debug, Serialize)]
pub struct PipelineResource {
    id: PipelineId,
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Pipeline> for PipelineResource {
    fn from(pipeline: &Pipeline) -> Self {
        Self {
            id: pipeline.id(),
            name: pipeline.name().as_str().to_owned(),
            kind: pipeline.kind().alias(),
            created_at: pipeline.created_at(),
            updated_at: pipeline.updated_at(),
        }
    }
}

/// A stage.
#[derive(Debug, Serialize)]
pub struct StageResource {
    id: StageId,
    name: String,
    color: String,
    pipeline_id: PipelineId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Stage> for StageResource {
    fn from(stage: &Stage) -> Self {
        Self {
            id: stage.id(),
            name: stage.name().as_str().to_owned(),
            color: stage.color().as_str().to_owned(),
            pipeline_id: stage.pipeline_id(),
            created_at: stage.created_at(),
            updated_at: stage.updated_at(),
        }
    }
}

/// The public part of a user, embedded in tasks.
#[derive(Debug, Serialize)]
pub struct UserResource {
    id: UserId,
    email: String,
    role: &'static str,
}

impl From<&User> for UserResource {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckboxResource {
    id: CheckboxId,
    description: String,
    is_checked: bool,
}

#[derive(Debug, Serialize)]
struct PlacementResource {
    pipeline_id: PipelineId,
    stage_id: Option<StageId>,
}

/// A task with its owner, checklist and placements. Dates render as
/// `YYYY-MM-DD`.
#[derive(Debug, Serialize)]
pub struct TaskResource {
    id: TaskId,
    name: String,
    status: TaskStatus,
    position: i32,
    start_at: Option<NaiveDate>,
    end_at: Option<NaiveDate>,
    user: UserResource,
    checkboxes: Vec<CheckboxResource>,
    pipelines: Vec<PlacementResource>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&TaskDetails> for TaskResource {
    fn from(details: &TaskDetails) -> Self {
        let task = details.task();
        Self {
            id: task.id(),
            name: task.name().as_str().to_owned(),
            status: task.status(),
            position: task.position(),
            start_at: task.schedule().start_at(),
            end_at: task.schedule().end_at(),
            user: UserResource::from(details.owner()),
            checkboxes: task
                .checklist()
                .items()
                .iter()
                .map(|checkbox| CheckboxResource {
                    id: checkbox.id(),
                    description: checkbox.description().as_str().to_owned(),
                    is_checked: checkbox.is_checked(),
                })
                .collect(),
            pipelines: task
                .placements()
                .as_slice()
                .iter()
                .map(|placement| PlacementResource {
                    pipeline_id: placement.pipeline_id(),
                    stage_id: placement.stage_id(),
                })
                .collect(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
