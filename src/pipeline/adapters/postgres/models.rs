//! Diesel row models for pipeline and stage persistence.

use super::schema::{pipelines, stages};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for pipeline records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pipelines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PipelineRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub kind: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for pipeline records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pipelines)]
pub struct NewPipelineRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub kind: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query result row for stage records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StageRow {
    pub id: uuid::Uuid,
    pub pipeline_id: uuid::Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for stage records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stages)]
pub struct NewStageRow {
    pub id: uuid::Uuid,
    pub pipeline_id: uuid::Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
