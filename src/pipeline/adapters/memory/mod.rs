//! In-memory adapters for pipelines and stages.

mod pipeline;

pub use pipeline::InMemoryPipelineRepository;
