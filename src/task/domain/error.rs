//! Error types for task domain validation and parsing.

use super::CheckboxId;
use crate::pipeline::domain::PipelineId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or changing task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the storage limit.
    #[error("task name exceeds 255 character limit")]
    TaskNameTooLong,

    /// The status is not one of the known task statuses.
    #[error("unknown task status '{0}'")]
    UnknownStatus(String),

    /// A checkbox description is empty after trimming.
    #[error("checkbox description must not be empty")]
    EmptyCheckboxDescription,

    /// A checkbox description exceeds the storage limit.
    #[error("checkbox description exceeds 255 character limit")]
    CheckboxDescriptionTooLong,

    /// A checklist edit names a checkbox the task does not own.
    #[error("checkbox {0} does not belong to this task")]
    UnknownCheckbox(CheckboxId),

    /// A checklist edit names the same checkbox twice.
    #[error("checkbox {0} appears more than once")]
    DuplicateCheckbox(CheckboxId),

    /// The task is placed into the same pipeline twice.
    #[error("pipeline {0} appears more than once")]
    DuplicatePlacement(PipelineId),

    /// `start_at` is not a recognised date.
    #[error("invalid start date '{0}'")]
    InvalidStartDate(String),

    /// `end_at` is not a recognised date.
    #[error("invalid end date '{0}'")]
    InvalidEndDate(String),

    /// The schedule window ends before it starts.
    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

impl TaskDomainError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTaskName | Self::TaskNameTooLong => "name",
            Self::UnknownStatus(_) => "status",
            Self::EmptyCheckboxDescription
            | Self::CheckboxDescriptionTooLong
            | Self::UnknownCheckbox(_)
            | Self::DuplicateCheckbox(_) => "checkboxes",
            Self::DuplicatePlacement(_) => "pipelines",
            Self::InvalidStartDate(_) => "start_at",
            Self::InvalidEndDate(_) | Self::EndBeforeStart { .. } => "end_at",
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
