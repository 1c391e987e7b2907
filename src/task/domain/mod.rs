//! Domain model for tasks.
//!
//! A task carries an ordered checklist and a set of pipeline placements. The
//! checklist is replaced wholesale on update; see [`Checklist::reconcile`].

mod checklist;
mod error;
mod ids;
mod placement;
mod schedule;
mod status;
mod task;
mod text;

pub use checklist::{Checkbox, CheckboxEdit, Checklist, ChecklistDiff};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{CheckboxId, TaskId};
pub use placement::{Placement, Placements};
pub use schedule::{Schedule, parse_calendar_date};
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskChanges};
pub use text::{CheckboxDescription, TaskName};
