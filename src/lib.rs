//! Taskboard: a small task-tracking backend.
//!
//! Authenticated users organise tasks into pipelines (boards) made of
//! coloured stages. A task carries a status, an optional schedule, an
//! ordered checklist, and its placement on any number of pipelines.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over the ports, consumed by [`http`]
//!
//! # Modules
//!
//! - [`user`]: Accounts and bearer-token authentication
//! - [`pipeline`]: Pipelines and their stages
//! - [`task`]: Tasks, checklists, schedules, and placements
//! - [`http`]: JSON API over axum
//! - [`paging`]: Offset pagination shared by ports and the API
//! - [`timestamp`]: Entity timestamps at storage precision
//! - [`config`] and [`db`]: Process configuration and the connection pool

pub mod config;
pub mod db;
pub mod http;
pub mod paging;
pub mod pipeline;
pub mod task;
pub mod timestamp;
pub mod user;
