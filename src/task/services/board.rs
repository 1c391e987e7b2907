//! Service layer for creating, editing, listing and deleting tasks.

use crate::paging::{Page, PageRequest};
use crate::pipeline::{
    domain::{PipelineId, StageId},
    ports::{PipelineRepository, PipelineRepositoryError},
};
use crate::task::{
    domain::{
        CheckboxDescription, CheckboxEdit, CheckboxId, Checklist, NewTaskData, Placement,
        Placements, Schedule, Task, TaskChanges, TaskDomainError, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    owner_id: Option<UserId>,
    position: Option<i32>,
    checkboxes: Vec<String>,
    placements: Vec<Placement>,
}

impl CreateTaskRequest {
    /// Creates a request for a task called `name` with no checklist or
    /// placements.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_id: None,
            position: None,
            checkboxes: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Assigns the task to `owner_id` instead of the acting user.
    #[must_use]
    pub const fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Sets the ordering key; defaults to zero.
    #[must_use]
    pub const fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the initial checklist lines, in order.
    #[must_use]
    pub fn with_checkboxes(mut self, descriptions: Vec<String>) -> Self {
        self.checkboxes = descriptions;
        self
    }

    /// Sets the initial pipeline placements.
    #[must_use]
    pub fn with_placements(mut self, placements: Vec<Placement>) -> Self {
        self.placements = placements;
        self
    }
}

/// One checklist line in an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxEditRequest {
    id: Option<CheckboxId>,
    description: String,
    is_checked: bool,
}

impl CheckboxEditRequest {
    /// Rewrites the existing checkbox `id`.
    #[must_use]
    pub fn existing(id: CheckboxId, description: impl Into<String>, is_checked: bool) -> Self {
        Self {
            id: Some(id),
            description: description.into(),
            is_checked,
        }
    }

    /// Adds a new checkbox.
    #[must_use]
    pub fn new_item(description: impl Into<String>, is_checked: bool) -> Self {
        Self {
            id: None,
            description: description.into(),
            is_checked,
        }
    }

    /// Creates an edit from an optional id, as received on the wire.
    #[must_use]
    pub fn from_parts(
        id: Option<CheckboxId>,
        description: impl Into<String>,
        is_checked: bool,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            is_checked,
        }
    }
}

/// Request payload for a full task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    name: String,
    owner_id: UserId,
    status: String,
    position: i32,
    start_at: Option<String>,
    end_at: Option<String>,
    checkboxes: Option<Vec<CheckboxEditRequest>>,
    placements: Option<Vec<Placement>>,
}

impl UpdateTaskRequest {
    /// Creates an update with the required fields and an open schedule.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner_id: UserId,
        status: impl Into<String>,
        position: i32,
    ) -> Self {
        Self {
            name: name.into(),
            owner_id,
            status: status.into(),
            position,
            start_at: None,
            end_at: None,
            checkboxes: None,
            placements: None,
        }
    }

    /// Sets the schedule window from client-supplied dates.
    #[must_use]
    pub fn with_schedule(mut self, start_at: Option<String>, end_at: Option<String>) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    /// Replaces the checklist wholesale.
    #[must_use]
    pub fn with_checkboxes(mut self, checkboxes: Vec<CheckboxEditRequest>) -> Self {
        self.checkboxes = Some(checkboxes);
        self
    }

    /// Replaces the placements wholesale.
    #[must_use]
    pub fn with_placements(mut self, placements: Vec<Placement>) -> Self {
        self.placements = Some(placements);
        self
    }
}

/// A task together with its owner, as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    task: Task,
    owner: User,
}

impl TaskDetails {
    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &User {
        &self.owner
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested owner does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// A placement names a pipeline that does not exist.
    #[error("pipeline not found: {0}")]
    UnknownPipeline(PipelineId),

    /// A placement names a stage that does not exist.
    #[error("stage not found: {0}")]
    UnknownStage(StageId),

    /// A placement pairs a stage with a pipeline it does not belong to.
    #[error("stage {stage_id} does not belong to pipeline {pipeline_id}")]
    StageOutsidePipeline {
        /// Requested stage.
        stage_id: StageId,
        /// Requested pipeline.
        pipeline_id: PipelineId,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A stored task points at an owner that no longer exists.
    #[error("owner {owner_id} of task {task_id} is missing")]
    MissingOwner {
        /// Affected task.
        task_id: TaskId,
        /// Missing owner.
        owner_id: UserId,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Pipeline lookup failed.
    #[error(transparent)]
    PipelineRepository(#[from] PipelineRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

impl TaskBoardError {
    /// Request field a validation failure refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Domain(err) => Some(err.field()),
            Self::UnknownUser(_) => Some("user_id"),
            Self::UnknownPipeline(_)
            | Self::UnknownStage(_)
            | Self::StageOutsidePipeline { .. }
            | Self::Repository(TaskRepositoryError::UnknownReference(_)) => Some("pipelines"),
            _ => None,
        }
    }
}

/// Result type for task operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Reports a task that vanished before a write as not found.
fn missing_task(err: TaskRepositoryError) -> TaskBoardError {
    match err {
        TaskRepositoryError::NotFound(missing) => TaskBoardError::NotFound(missing),
        other => other.into(),
    }
}

/// Task orchestration service.
///
/// Checks every user, pipeline and stage a task refers to before writing it.
pub struct TaskBoardService<T, P, U, C>
where
    T: TaskRepository + ?Sized,
    P: PipelineRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    pipelines: Arc<P>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, P, U, C> TaskBoardService<T, P, U, C>
where
    T: TaskRepository + ?Sized,
    P: PipelineRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, pipelines: Arc<P>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            pipelines,
            users,
            clock,
        }
    }

    /// Creates a task on behalf of `actor`.
    ///
    /// The task starts in [`TaskStatus::Wait`], is owned by `actor` unless the
    /// request names another owner, and has one unchecked checkbox per
    /// requested line.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for invalid values,
    /// [`TaskBoardError::UnknownUser`], [`TaskBoardError::UnknownPipeline`],
    /// [`TaskBoardError::UnknownStage`] or
    /// [`TaskBoardError::StageOutsidePipeline`] for dangling references, and a
    /// repository error when persistence fails.
    pub async fn create(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskBoardResult<TaskDetails> {
        let CreateTaskRequest {
            name,
            owner_id,
            position,
            checkboxes,
            placements,
        } = request;

        let task_name = TaskName::new(&name)?;
        let descriptions = checkboxes
            .into_iter()
            .map(CheckboxDescription::new)
            .collect::<Result<Vec<_>, _>>()?;
        let task_placements = Placements::new(placements)?;
        let owner = self.require_user(owner_id.unwrap_or(actor)).await?;
        self.check_placements(&task_placements).await?;

        let task = Task::new(
            NewTaskData {
                name: task_name,
                owner_id: owner.id(),
                position: position.unwrap_or(0),
                checklist: Checklist::from_descriptions(descriptions),
                placements: task_placements,
            },
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            owner_id = %owner.id(),
            checkboxes = task.checklist().len(),
            "created task"
        );
        Ok(TaskDetails { task, owner })
    }

    /// Applies a full update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the task does not exist, and
    /// otherwise the same errors as [`Self::create`].
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskBoardResult<TaskDetails> {
        let UpdateTaskRequest {
            name,
            owner_id,
            status,
            position,
            start_at,
            end_at,
            checkboxes,
            placements,
        } = request;

        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskBoardError::NotFound(id))?;

        let task_name = TaskName::new(&name)?;
        let task_status = TaskStatus::parse(&status)?;
        let schedule = Schedule::parse(start_at.as_deref(), end_at.as_deref())?;
        let edits = checkboxes
            .map(|lines| {
                lines
                    .into_iter()
                    .map(|line| {
                        let CheckboxEditRequest {
                            id: checkbox_id,
                            description,
                            is_checked,
                        } = line;
                        CheckboxDescription::new(description)
                            .map(|text| CheckboxEdit::new(checkbox_id, text, is_checked))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let replacement = placements.map(Placements::new).transpose()?;

        let owner = self.require_user(owner_id).await?;
        if let Some(next) = &replacement {
            self.check_placements(next).await?;
        }

        let diff = task.apply(
            TaskChanges {
                name: task_name,
                owner_id,
                status: task_status,
                position,
                schedule,
                checklist: edits,
                placements: replacement,
            },
            &*self.clock,
        )?;
        self.tasks.update(&task).await.map_err(missing_task)?;

        if let Some(changes) = &diff {
            tracing::debug!(
                task_id = %id,
                inserted = changes.inserted().len(),
                updated = changes.updated().len(),
                removed = changes.removed().len(),
                "reconciled checklist"
            );
        }
        tracing::info!(task_id = %id, status = %task.status(), "updated task");
        Ok(TaskDetails { task, owner })
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails or
    /// [`TaskBoardError::MissingOwner`] when the owner record is gone.
    pub async fn find(&self, id: TaskId) -> TaskBoardResult<Option<TaskDetails>> {
        let Some(task) = self.tasks.find_by_id(id).await? else {
            return Ok(None);
        };
        let owner = self.owner_of(&task).await?;
        Ok(Some(TaskDetails { task, owner }))
    }

    /// Returns one page of tasks matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails or
    /// [`TaskBoardError::MissingOwner`] when an owner record is gone.
    pub async fn list(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskBoardResult<Page<TaskDetails>> {
        let tasks = self.tasks.list(filter, page).await?;
        tracing::debug!(total = tasks.total(), page = page.page(), "listed tasks");

        let owner_ids: HashSet<UserId> = tasks.items().iter().map(Task::owner_id).collect();
        let mut owners: HashMap<UserId, User> = HashMap::with_capacity(owner_ids.len());
        for owner_id in owner_ids {
            if let Some(owner) = self.users.find_by_id(owner_id).await? {
                owners.insert(owner_id, owner);
            }
        }

        tasks.try_map(|task| {
            let Some(owner) = owners.get(&task.owner_id()).cloned() else {
                return Err(TaskBoardError::MissingOwner {
                    task_id: task.id(),
                    owner_id: task.owner_id(),
                });
            };
            Ok(TaskDetails { task, owner })
        })
    }

    /// Deletes a task with its checklist and placements.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskBoardResult<()> {
        self.tasks.delete(id).await.map_err(missing_task)?;
        tracing::info!(task_id = %id, "deleted task");
        Ok(())
    }

    async fn require_user(&self, id: UserId) -> TaskBoardResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(TaskBoardError::UnknownUser(id))
    }

    async fn owner_of(&self, task: &Task) -> TaskBoardResult<User> {
        self.users
            .find_by_id(task.owner_id())
            .await?
            .ok_or(TaskBoardError::MissingOwner {
                task_id: task.id(),
                owner_id: task.owner_id(),
            })
    }

    async fn check_placements(&self, placements: &Placements) -> TaskBoardResult<()> {
        for placement in placements.as_slice() {
            let pipeline_id = placement.pipeline_id();
            if self.pipelines.find_pipeline(pipeline_id).await?.is_none() {
                return Err(TaskBoardError::UnknownPipeline(pipeline_id));
            }
            let Some(stage_id) = placement.stage_id() else {
                continue;
            };
            let stage = self
                .pipelines
                .find_stage(stage_id)
                .await?
                .ok_or(TaskBoardError::UnknownStage(stage_id))?;
            if stage.pipeline_id() != pipeline_id {
                return Err(TaskBoardError::StageOutsidePipeline {
                    stage_id,
                    pipeline_id,
                });
            }
        }
        Ok(())
    }
}
