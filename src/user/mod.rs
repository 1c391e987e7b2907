//! User directory for Taskboard.
//!
//! Users own tasks and authenticate API requests with bearer tokens. Only the
//! SHA-256 digest of a token is ever stored. The module follows hexagonal
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
