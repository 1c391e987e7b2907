//! Pipelines and their stages.
//!
//! A pipeline is a named workflow template classified by a type alias; a
//! stage is a coloured column within exactly one pipeline. Tasks are placed
//! into pipelines (and optionally stages) by the [`crate::task`] module. The
//! module follows hexagonal architecture:
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
