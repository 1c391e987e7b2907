//! Tasks: work items with checklists, placed into pipelines.
//!
//! A task is owned by a user, carries an ordered checklist and a status, and
//! can sit in several pipelines at once (optionally in one stage of each).
//! Updates replace the checklist wholesale while preserving the identity of
//! checkboxes the client refers to by id. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
