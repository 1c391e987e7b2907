//! Shared application state handed to every handler.

use crate::db::PgPool;
use crate::pipeline::{
    adapters::{memory::InMemoryPipelineRepository, postgres::PostgresPipelineRepository},
    ports::PipelineRepository,
    services::PipelineCatalogService,
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskBoardService,
};
use crate::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::UserRepository,
    services::UserDirectory,
};
use mockable::DefaultClock;
use std::sync::Arc;

/// User directory over a type-erased repository.
pub type SharedUserDirectory = UserDirectory<dyn UserRepository, DefaultClock>;

/// Pipeline catalog over a type-erased repository.
pub type SharedPipelineCatalog = PipelineCatalogService<dyn PipelineRepository, DefaultClock>;

/// Task service over type-erased repositories.
pub type SharedTaskBoard =
    TaskBoardService<dyn TaskRepository, dyn PipelineRepository, dyn UserRepository, DefaultClock>;

/// Services used by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    users: Arc<SharedUserDirectory>,
    pipelines: Arc<SharedPipelineCatalog>,
    tasks: Arc<SharedTaskBoard>,
}

impl AppState {
    /// Wires the services over the given repositories.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        pipelines: Arc<dyn PipelineRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            users: Arc::new(UserDirectory::new(Arc::clone(&users), Arc::clone(&clock))),
            pipelines: Arc::new(PipelineCatalogService::new(
                Arc::clone(&pipelines),
                Arc::clone(&clock),
            )),
            tasks: Arc::new(TaskBoardService::new(tasks, pipelines, users, clock)),
        }
    }

    /// State backed by in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPipelineRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
        )
    }

    /// State backed by `PostgreSQL` repositories sharing `pool`.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresPipelineRepository::new(pool.clone())),
            Arc::new(PostgresTaskRepository::new(pool.clone())),
        )
    }

    /// User directory, used for authentication.
    #[must_use]
    pub fn users(&self) -> &SharedUserDirectory {
        &self.users
    }

    /// Pipeline and stage catalog.
    #[must_use]
    pub fn pipelines(&self) -> &SharedPipelineCatalog {
        &self.pipelines
    }

    /// Task service.
    #[must_use]
    pub fn tasks(&self) -> &SharedTaskBoard {
        &self.tasks
    }
}
