//! `PostgreSQL` repository implementation for tasks.
//!
//! A task spans three tables: `tasks`, `checkboxes` and `task_placements`.
//! Every write touches all three inside one transaction.

use super::{
    models::{CheckboxRow, NewTaskRow, PlacementRow, TaskChangeset, TaskRow},
    schema::{checkboxes, task_placements, tasks},
};
use crate::db::PgPool;
use crate::paging::{Page, PageRequest};
use crate::pipeline::domain::{PipelineId, StageId};
use crate::task::{
    domain::{
        Checkbox, CheckboxDescription, CheckboxId, Checklist, PersistedTaskData, Placement,
        Placements, Schedule, Task, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;
use std::collections::HashMap;
use uuid::Uuid;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::UnknownReference(
                    info.constraint_name()
                        .unwrap_or_else(|| info.message())
                        .to_owned(),
                )
            }
            other => Self::persistence(other),
        }
    }
}

/// Rows making up one task.
struct TaskRows {
    task: NewTaskRow,
    checkboxes: Vec<CheckboxRow>,
    placements: Vec<PlacementRow>,
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let rows = to_rows(task)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&rows.task)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        other => other.into(),
                    })?;
                if !rows.checkboxes.is_empty() {
                    diesel::insert_into(checkboxes::table)
                        .values(&rows.checkboxes)
                        .execute(tx)?;
                }
                insert_placements(tx, &rows.placements)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let rows = to_rows(task)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let changeset = TaskChangeset {
                    name: rows.task.name.clone(),
                    user_id: rows.task.user_id,
                    status: rows.task.status.clone(),
                    position: rows.task.position,
                    start_at: rows.task.start_at,
                    end_at: rows.task.end_at,
                    updated_at: rows.task.updated_at,
                };
                let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                    .set(&changeset)
                    .execute(tx)?;
                if affected == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                replace_checkboxes(tx, task_id, &rows.checkboxes)?;

                diesel::delete(
                    task_placements::table
                        .filter(task_placements::task_id.eq(task_id.into_inner())),
                )
                .execute(tx)?;
                insert_placements(tx, &rows.placements)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            let Some(found) = row else {
                return Ok(None);
            };
            let mut loaded = hydrate(connection, vec![found])?;
            Ok(loaded.pop())
        })
        .await
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        let criteria = *filter;
        self.run_blocking(move |connection| {
            let total: i64 = filtered(&criteria).count().get_result(connection)?;
            let offset =
                i64::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
            let rows = filtered(&criteria)
                .order((tasks::position.asc(), tasks::created_at.asc(), tasks::id.asc()))
                .limit(i64::from(page.per_page()))
                .offset(offset)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            let items = hydrate(connection, rows)?;
            let count = u64::try_from(total).map_err(TaskRepositoryError::invalid_persisted_data)?;
            Ok(Page::new(items, page, count))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn filtered(filter: &TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let mut query = tasks::table.into_boxed();
    if let Some(pipeline_id) = filter.pipeline_id() {
        query = query.filter(
            tasks::id.eq_any(
                task_placements::table
                    .filter(task_placements::pipeline_id.eq(pipeline_id.into_inner()))
                    .select(task_placements::task_id),
            ),
        );
    }
    if let Some(stage_id) = filter.stage_id() {
        query = query.filter(
            tasks::id.eq_any(
                task_placements::table
                    .filter(task_placements::stage_id.eq(stage_id.into_inner()))
                    .select(task_placements::task_id),
            ),
        );
    }
    if let Some(owner_id) = filter.owner_id() {
        query = query.filter(tasks::user_id.eq(owner_id.into_inner()));
    }
    if let Some(status) = filter.status() {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    query
}

fn insert_placements(tx: &mut PgConnection, rows: &[PlacementRow]) -> TaskRepositoryResult<()> {
    if !rows.is_empty() {
        diesel::insert_into(task_placements::table)
            .values(rows)
            .execute(tx)?;
    }
    Ok(())
}

/// Deletes dropped checkboxes and upserts the rest with their new order.
fn replace_checkboxes(
    tx: &mut PgConnection,
    task_id: TaskId,
    rows: &[CheckboxRow],
) -> TaskRepositoryResult<()> {
    let kept: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    diesel::delete(
        checkboxes::table
            .filter(checkboxes::task_id.eq(task_id.into_inner()))
            .filter(checkboxes::id.ne_all(kept)),
    )
    .execute(tx)?;

    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(checkboxes::table)
        .values(rows)
        .on_conflict(checkboxes::id)
        .do_update()
        .set((
            checkboxes::description.eq(excluded(checkboxes::description)),
            checkboxes::is_checked.eq(excluded(checkboxes::is_checked)),
            checkboxes::sort_order.eq(excluded(checkboxes::sort_order)),
        ))
        .execute(tx)?;
    Ok(())
}

/// Loads checklists and placements for `rows`, keeping the row order.
fn hydrate(tx: &mut PgConnection, rows: Vec<TaskRow>) -> TaskRepositoryResult<Vec<Task>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let mut checkboxes_by_task: HashMap<Uuid, Vec<CheckboxRow>> = HashMap::new();
    for checkbox in checkboxes::table
        .filter(checkboxes::task_id.eq_any(ids.clone()))
        .order((checkboxes::task_id, checkboxes::sort_order))
        .select(CheckboxRow::as_select())
        .load::<CheckboxRow>(tx)?
    {
        checkboxes_by_task
            .entry(checkbox.task_id)
            .or_default()
            .push(checkbox);
    }

    let mut placements_by_task: HashMap<Uuid, Vec<PlacementRow>> = HashMap::new();
    for placement in task_placements::table
        .filter(task_placements::task_id.eq_any(ids))
        .order((task_placements::task_id, task_placements::sort_order))
        .select(PlacementRow::as_select())
        .load::<PlacementRow>(tx)?
    {
        placements_by_task
            .entry(placement.task_id)
            .or_default()
            .push(placement);
    }

    rows.into_iter()
        .map(|row| {
            let checklist = checkboxes_by_task.remove(&row.id).unwrap_or_default();
            let placements = placements_by_task.remove(&row.id).unwrap_or_default();
            row_to_task(row, checklist, placements)
        })
        .collect()
}

fn to_rows(task: &Task) -> TaskRepositoryResult<TaskRows> {
    let task_uuid = task.id().into_inner();
    let checkbox_rows = task
        .checklist()
        .items()
        .iter()
        .enumerate()
        .map(|(index, checkbox)| {
            Ok(CheckboxRow {
                id: checkbox.id().into_inner(),
                task_id: task_uuid,
                description: checkbox.description().as_str().to_owned(),
                is_checked: checkbox.is_checked(),
                sort_order: i32::try_from(index).map_err(TaskRepositoryError::persistence)?,
            })
        })
        .collect::<TaskRepositoryResult<Vec<_>>>()?;
    let placement_rows = task
        .placements()
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, placement)| {
            Ok(PlacementRow {
                task_id: task_uuid,
                pipeline_id: placement.pipeline_id().into_inner(),
                stage_id: placement.stage_id().map(StageId::into_inner),
                sort_order: i32::try_from(index).map_err(TaskRepositoryError::persistence)?,
            })
        })
        .collect::<TaskRepositoryResult<Vec<_>>>()?;

    Ok(TaskRows {
        task: NewTaskRow {
            id: task_uuid,
            name: task.name().as_str().to_owned(),
            user_id: task.owner_id().into_inner(),
            status: task.status().as_str().to_owned(),
            position: task.position(),
            start_at: task.schedule().start_at(),
            end_at: task.schedule().end_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        },
        checkboxes: checkbox_rows,
        placements: placement_rows,
    })
}

fn row_to_task(
    row: TaskRow,
    checkbox_rows: Vec<CheckboxRow>,
    placement_rows: Vec<PlacementRow>,
) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name: persisted_name,
        user_id,
        status: persisted_status,
        position,
        start_at,
        end_at,
        created_at,
        updated_at,
    } = row;

    let name = TaskName::new(persisted_name).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;
    let schedule =
        Schedule::new(start_at, end_at).map_err(TaskRepositoryError::invalid_persisted_data)?;

    let items = checkbox_rows
        .into_iter()
        .map(|checkbox| {
            let description = CheckboxDescription::new(checkbox.description)
                .map_err(TaskRepositoryError::invalid_persisted_data)?;
            Ok(Checkbox::from_persisted(
                CheckboxId::from_uuid(checkbox.id),
                description,
                checkbox.is_checked,
            ))
        })
        .collect::<TaskRepositoryResult<Vec<_>>>()?;
    let placements = Placements::new(
        placement_rows
            .into_iter()
            .map(|placement| {
                Placement::new(
                    PipelineId::from_uuid(placement.pipeline_id),
                    placement.stage_id.map(StageId::from_uuid),
                )
            })
            .collect(),
    )
    .map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        name,
        owner_id: UserId::from_uuid(user_id),
        status,
        position,
        schedule,
        checklist: Checklist::from_persisted(items),
        placements,
        created_at,
        updated_at,
    }))
}
