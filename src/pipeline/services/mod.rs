//! Application services for pipelines and stages.

mod catalog;

pub use catalog::{
    CreatePipelineRequest, CreateStageRequest, PipelineCatalogError, PipelineCatalogResult,
    PipelineCatalogService,
};
