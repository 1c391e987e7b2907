//! Step definitions for task checklist scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
