//! Diesel row models for task persistence.

use super::schema::{checkboxes, task_placements, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub user_id: uuid::Uuid,
    pub status: String,
    pub position: i32,
    pub start_at: Option<NaiveDate>,
    pub end_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub user_id: uuid::Uuid,
    pub status: String,
    pub position: i32,
    pub start_at: Option<NaiveDate>,
    pub end_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column updates applied when a task is edited.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    pub name: String,
    pub user_id: uuid::Uuid,
    pub status: String,
    pub position: i32,
    pub start_at: Option<NaiveDate>,
    pub end_at: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Query result row and insert model for checkboxes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = checkboxes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckboxRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub description: String,
    pub is_checked: bool,
    pub sort_order: i32,
}

/// Query result row and insert model for placements.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_placements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlacementRow {
    pub task_id: uuid::Uuid,
    pub pipeline_id: uuid::Uuid,
    pub stage_id: Option<uuid::Uuid>,
    pub sort_order: i32,
}
