//! `PostgreSQL` adapters for pipeline and stage persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresPipelineRepository;
