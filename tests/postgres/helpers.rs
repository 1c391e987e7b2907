//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, TemporaryDatabase};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::db::apply_migrations;
use taskboard::pipeline::{
    adapters::postgres::PostgresPipelineRepository,
    domain::{Pipeline, PipelineKind, PipelineName, Stage, StageColor, StageName},
    ports::PipelineRepository,
};
use taskboard::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{CheckboxDescription, Checklist, NewTaskData, Placement, Placements, Task, TaskName},
};
use taskboard::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{Email, User, UserRole},
    ports::UserRepository,
};

/// Provides a [`DefaultClock`] for test fixtures.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// A migrated database and one repository per aggregate.
pub struct Repositories {
    pub users: PostgresUserRepository,
    pub pipelines: PostgresPipelineRepository,
    pub tasks: PostgresTaskRepository,
    /// Owns the database; dropping it drops the database.
    pub database: TemporaryDatabase,
}

/// Creates and migrates a database, or returns `None` when no server is
/// configured.
///
/// # Errors
///
/// Returns an error if the database cannot be created or migrated.
pub async fn setup() -> Result<Option<Repositories>, BoxError> {
    let Some(database) = TemporaryDatabase::create()? else {
        return Ok(None);
    };
    apply_migrations(database.pool()).await?;
    let pool = database.pool().clone();
    Ok(Some(Repositories {
        users: PostgresUserRepository::new(pool.clone()),
        pipelines: PostgresPipelineRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        database,
    }))
}

/// Stores a member with the given email.
pub async fn seed_user(repos: &Repositories, email: &str) -> Result<User, BoxError> {
    let user = User::new(Email::new(email)?, UserRole::Member, &DefaultClock);
    repos.users.store(&user).await?;
    Ok(user)
}

/// Stores a task pipeline with the given name.
pub async fn seed_pipeline(repos: &Repositories, name: &str) -> Result<Pipeline, BoxError> {
    let pipeline = Pipeline::new(PipelineName::new(name)?, PipelineKind::Task, &DefaultClock);
    repos.pipelines.store_pipeline(&pipeline).await?;
    Ok(pipeline)
}

/// Stores a stage in `pipeline`.
pub async fn seed_stage(
    repos: &Repositories,
    pipeline: &Pipeline,
    name: &str,
) -> Result<Stage, BoxError> {
    let stage = Stage::new(
        pipeline.id(),
        StageName::new(name)?,
        StageColor::new("#336699")?,
        &DefaultClock,
    );
    repos.pipelines.store_stage(&stage).await?;
    Ok(stage)
}

/// Builds, but does not store, a task owned by `owner`.
pub fn build_task(
    owner: &User,
    name: &str,
    position: i32,
    checkboxes: &[&str],
    placements: Vec<Placement>,
) -> Result<Task, BoxError> {
    let descriptions = checkboxes
        .iter()
        .map(|line| CheckboxDescription::new(*line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Task::new(
        NewTaskData {
            name: TaskName::new(name)?,
            owner_id: owner.id(),
            position,
            checklist: Checklist::from_descriptions(descriptions),
            placements: Placements::new(placements)?,
        },
        &DefaultClock,
    ))
}
