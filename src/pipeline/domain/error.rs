//! Error types for pipeline domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing pipeline and stage values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineDomainError {
    /// The pipeline name is empty after trimming.
    #[error("pipeline name must not be empty")]
    EmptyPipelineName,

    /// The pipeline name exceeds the storage limit.
    #[error("pipeline name exceeds 255 character limit")]
    PipelineNameTooLong,

    /// The pipeline type alias is not recognised.
    #[error("unknown pipeline type '{0}'")]
    UnknownPipelineType(String),

    /// The stage name is empty after trimming.
    #[error("stage name must not be empty")]
    EmptyStageName,

    /// The stage name exceeds the storage limit.
    #[error("stage name exceeds 255 character limit")]
    StageNameTooLong,

    /// The stage colour is not a hex colour.
    #[error("invalid stage color '{0}', expected #rgb or #rrggbb")]
    InvalidStageColor(String),
}

impl PipelineDomainError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyPipelineName
            | Self::PipelineNameTooLong
            | Self::EmptyStageName
            | Self::StageNameTooLong => "name",
            Self::UnknownPipelineType(_) => "type",
            Self::InvalidStageColor(_) => "color",
        }
    }
}

/// Error returned while parsing pipeline type codes from persistence.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unknown pipeline type code: {0}")]
pub struct ParsePipelineKindError(pub i16);
