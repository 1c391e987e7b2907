//! Domain model for pipelines and stages.

mod color;
mod error;
mod ids;
mod kind;
mod name;
mod pipeline;
mod stage;

pub use color::StageColor;
pub use error::{ParsePipelineKindError, PipelineDomainError};
pub use ids::{PipelineId, StageId};
pub use kind::PipelineKind;
pub use name::{PipelineName, StageName};
pub use pipeline::{PersistedPipelineData, Pipeline};
pub use stage::{PersistedStageData, Stage};
