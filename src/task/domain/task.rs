//! Task aggregate root.

use super::{
    CheckboxEdit, Checklist, ChecklistDiff, Placements, Schedule, TaskDomainError, TaskId,
    TaskName, TaskStatus,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A work item owned by a user, with a checklist and pipeline placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    owner_id: UserId,
    status: TaskStatus,
    position: i32,
    schedule: Schedule,
    checklist: Checklist,
    placements: Placements,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated values for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task name.
    pub name: TaskName,
    /// Owning user.
    pub owner_id: UserId,
    /// Ordering key.
    pub position: i32,
    /// Initial checklist.
    pub checklist: Checklist,
    /// Initial placements.
    pub placements: Placements,
}

/// Validated values replacing a task's editable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New name.
    pub name: TaskName,
    /// New owner.
    pub owner_id: UserId,
    /// New status.
    pub status: TaskStatus,
    /// New ordering key.
    pub position: i32,
    /// New schedule window.
    pub schedule: Schedule,
    /// Replacement checklist; `None` keeps the current one.
    pub checklist: Option<Vec<CheckboxEdit>>,
    /// Replacement placements; `None` keeps the current ones.
    pub placements: Option<Placements>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted ordering key.
    pub position: i32,
    /// Persisted schedule window.
    pub schedule: Schedule,
    /// Persisted checklist, in order.
    pub checklist: Checklist,
    /// Persisted placements.
    pub placements: Placements,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in the [`TaskStatus::Wait`] status with no schedule.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = crate::timestamp::now(clock);
        Self {
            id: TaskId::new(),
            name: data.name,
            owner_id: data.owner_id,
            status: TaskStatus::Wait,
            position: data.position,
            schedule: Schedule::default(),
            checklist: data.checklist,
            placements: data.placements,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            owner_id: data.owner_id,
            status: data.status,
            position: data.position,
            schedule: data.schedule,
            checklist: data.checklist,
            placements: data.placements,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Applies a full update.
    ///
    /// Either every change is applied or, on error, none is. Returns the
    /// checklist diff when the checklist was replaced.
    ///
    /// # Errors
    ///
    /// Returns the checklist reconciliation error when an edit references an
    /// unknown or repeated checkbox.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<Option<ChecklistDiff>, TaskDomainError> {
        let TaskChanges {
            name,
            owner_id,
            status,
            position,
            schedule,
            checklist,
            placements,
        } = changes;

        let reconciled = checklist
            .map(|edits| self.checklist.reconcile(edits))
            .transpose()?;

        self.name = name;
        self.owner_id = owner_id;
        self.status = status;
        self.position = position;
        self.schedule = schedule;
        if let Some(replacement) = placements {
            self.placements = replacement;
        }
        self.updated_at = crate::timestamp::now(clock);

        Ok(reconciled.map(|(next, diff)| {
            self.checklist = next;
            diff
        }))
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the ordering key.
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Returns the schedule window.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Returns the checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Returns the pipeline placements.
    #[must_use]
    pub const fn placements(&self) -> &Placements {
        &self.placements
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
