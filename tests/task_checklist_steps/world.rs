//! Shared world state for task checklist BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::pipeline::adapters::memory::InMemoryPipelineRepository;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{TaskBoardResult, TaskBoardService, TaskDetails},
};
use taskboard::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Email, User, UserRole},
    ports::UserRepository,
};

/// Service type used by the BDD world.
pub type TestBoard = TaskBoardService<
    InMemoryTaskRepository,
    InMemoryPipelineRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// Scenario world for checklist behaviour tests.
pub struct ChecklistWorld {
    pub board: TestBoard,
    pub users: Arc<InMemoryUserRepository>,
    pub owner: Option<User>,
    pub task: Option<TaskDetails>,
    pub other_task: Option<TaskDetails>,
    pub last_update: Option<TaskBoardResult<TaskDetails>>,
}

impl ChecklistWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let board = TaskBoardService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryPipelineRepository::new()),
            Arc::clone(&users),
            Arc::new(DefaultClock),
        );

        Self {
            board,
            users,
            owner: None,
            task: None,
            other_task: None,
            last_update: None,
        }
    }

    /// Returns the scenario's task owner, registering one on first use.
    pub fn owner(&mut self) -> Result<User, eyre::Report> {
        if let Some(existing) = &self.owner {
            return Ok(existing.clone());
        }
        let user = User::new(
            Email::new("user@user.ru").map_err(|err| eyre::eyre!("{err}"))?,
            UserRole::Member,
            &DefaultClock,
        );
        run_async(self.users.store(&user)).map_err(|err| eyre::eyre!("{err}"))?;
        self.owner = Some(user.clone());
        Ok(user)
    }

    /// Returns the primary task of the scenario.
    pub fn task(&self) -> Result<&TaskDetails, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for ChecklistWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ChecklistWorld {
    ChecklistWorld::default()
}

/// Splits a comma-separated list of checkbox descriptions.
pub fn split_lines(lines: &str) -> Vec<String> {
    lines
        .split(',')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
