//! Port contracts for pipelines and stages.

pub mod repository;

pub use repository::{PipelineRepository, PipelineRepositoryError, PipelineRepositoryResult};
