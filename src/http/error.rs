//! JSON error responses.

use crate::pipeline::services::PipelineCatalogError;
use crate::task::{ports::TaskRepositoryError, services::TaskBoardError};
use crate::user::services::UserDirectoryError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Field name to validation messages.
pub type FieldMessages = BTreeMap<String, Vec<String>>;

/// Error returned by handlers, rendered as
/// `{success: false, message, errors?}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was understood but its content is invalid (422).
    #[error("{message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Messages per offending field.
        errors: FieldMessages,
    },

    /// No valid bearer token was supplied (401).
    #[error("Unauthenticated.")]
    Unauthenticated,

    /// The resource named in the path does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Something failed on our side (500). The detail is logged, not
    /// returned.
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a FieldMessages>,
}

impl ApiError {
    /// A validation error for a single field.
    #[must_use]
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let text = message.into();
        let mut errors = FieldMessages::new();
        errors.insert(field.to_owned(), vec![text.clone()]);
        Self::Validation {
            message: text,
            errors,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match &self {
            Self::Validation { message, errors } => {
                (message.as_str(), Some(errors).filter(|map| !map.is_empty()))
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                ("Server Error", None)
            }
            Self::Unauthenticated => ("Unauthenticated.", None),
            Self::NotFound(message) => (message.as_str(), None),
        };
        let body = ErrorBody {
            success: false,
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

/// Bodies decode every field as a loose [`Value`], so a rejection only
/// happens when the payload as a whole is unusable.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "The request body must be sent as application/json."
            }
            _ => "The request body must be a JSON object.",
        };
        Self::Validation {
            message: message.to_owned(),
            errors: FieldMessages::new(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected query string");
        Self::Validation {
            message: "The query string is malformed.".to_owned(),
            errors: FieldMessages::new(),
        }
    }
}

impl From<PipelineCatalogError> for ApiError {
    fn from(err: PipelineCatalogError) -> Self {
        match err {
            PipelineCatalogError::Domain(domain) => Self::field(domain.field(), domain.to_string()),
            PipelineCatalogError::PipelineNotFound(_) => {
                Self::field("pipeline_id", "The selected pipeline id is invalid.")
            }
            PipelineCatalogError::Repository(repository) => Self::Internal(repository.to_string()),
        }
    }
}

impl From<TaskBoardError> for ApiError {
    fn from(err: TaskBoardError) -> Self {
        if let Some(field) = err.field() {
            tracing::debug!(error = %err, field, "rejected task change");
            return Self::field(field, reference_message(&err));
        }
        match err {
            TaskBoardError::NotFound(_) => Self::NotFound("Task not found.".to_owned()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Client-facing wording for a rejected task reference.
fn reference_message(err: &TaskBoardError) -> String {
    let text = match err {
        TaskBoardError::UnknownUser(_) => "The selected user id is invalid.",
        TaskBoardError::UnknownPipeline(_)
        | TaskBoardError::Repository(TaskRepositoryError::UnknownReference(_)) => {
            "The selected pipeline id is invalid."
        }
        TaskBoardError::UnknownStage(_) => "The selected stage id is invalid.",
        TaskBoardError::StageOutsidePipeline { .. } => {
            "The selected stage does not belong to the selected pipeline."
        }
        other => return other.to_string(),
    };
    text.to_owned()
}

impl From<UserDirectoryError> for ApiError {
    fn from(err: UserDirectoryError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Collects per-field validation failures for a request body.
///
/// Accessors return a placeholder for missing or malformed input so that
/// every field can be checked before [`FieldErrors::finish`] reports them
/// together.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: FieldMessages,
}

impl FieldErrors {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns the value, recording an error when it is absent.
    pub fn required<T: Default>(&mut self, field: &str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.add(field, format!("The {field} field is required."));
            T::default()
        })
    }

    /// Reads an optional string. `null` counts as absent.
    pub fn string(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value? {
            Value::Null => None,
            Value::String(text) => Some(text),
            _ => {
                self.add(field, format!("The {field} field must be a string."));
                None
            }
        }
    }

    /// Reads a required string.
    pub fn required_string(&mut self, field: &str, value: Option<Value>) -> String {
        match value {
            None | Some(Value::Null) => self.required(field, None),
            present => self.string(field, present).unwrap_or_default(),
        }
    }

    /// Reads an optional integer, accepting numeric strings.
    pub fn integer(&mut self, field: &str, value: Option<Value>) -> Option<i32> {
        let parsed = match value? {
            Value::Null => return None,
            Value::Number(number) => number.as_i64().and_then(|wide| i32::try_from(wide).ok()),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.add(field, format!("The {field} field must be an integer."));
        }
        parsed
    }

    /// Reads a required integer.
    pub fn required_integer(&mut self, field: &str, value: Option<Value>) -> i32 {
        match value {
            None | Some(Value::Null) => self.required(field, None),
            present => self.integer(field, present).unwrap_or_default(),
        }
    }

    /// Reads an optional flag, accepting `0`, `1` and their string forms.
    pub fn boolean(&mut self, field: &str, value: Option<Value>) -> Option<bool> {
        let parsed = match value? {
            Value::Null => return None,
            Value::Bool(flag) => Some(flag),
            Value::Number(number) => match number.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(text) => match text.as_str() {
                "0" | "false" => Some(false),
                "1" | "true" => Some(true),
                _ => None,
            },
            _ => None,
        };
        if parsed.is_none() {
            self.add(field, format!("The {field} field must be true or false."));
        }
        parsed
    }

    /// Reads an optional array.
    pub fn array(&mut self, field: &str, value: Option<Value>) -> Option<Vec<Value>> {
        match value? {
            Value::Null => None,
            Value::Array(items) => Some(items),
            _ => {
                self.add(field, format!("The {field} field must be an array."));
                None
            }
        }
    }

    /// Reads an array element that must be an object.
    pub fn object(&mut self, field: &str, value: Value) -> Option<Map<String, Value>> {
        if let Value::Object(fields) = value {
            return Some(fields);
        }
        self.add(field, format!("The {field} field must be an object."));
        None
    }

    /// Parses an optional positive number from a query string.
    pub fn query_number(&mut self, field: &str, raw: Option<&str>) -> Option<u32> {
        let text = raw?;
        let parsed = text.trim().parse().ok();
        if parsed.is_none() {
            self.add(field, format!("The {field} field must be an integer."));
        }
        parsed
    }

    /// Parses an identifier, recording an error when it is malformed.
    pub fn id(&mut self, field: &str, raw: &str) -> Uuid {
        Uuid::parse_str(raw.trim()).unwrap_or_else(|_| {
            self.add(field, format!("The {field} field must be a valid UUID."));
            Uuid::nil()
        })
    }

    /// Parses an optional identifier.
    pub fn optional_id(&mut self, field: &str, value: Option<Value>) -> Option<Uuid> {
        let raw = self.string(field, value)?;
        Some(self.id(field, &raw))
    }

    /// Parses a required identifier.
    pub fn required_id(&mut self, field: &str, value: Option<Value>) -> Uuid {
        match value {
            None | Some(Value::Null) => self.required(field, None),
            present => self
                .string(field, present)
                .map_or(Uuid::nil(), |raw| self.id(field, &raw)),
        }
    }

    /// Fails with every recorded message, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when at least one field failed.
    pub fn finish(self) -> Result<(), ApiError> {
        let Some(first) = self.errors.values().flatten().next().cloned() else {
            return Ok(());
        };
        let extra = self
            .errors
            .values()
            .map(Vec::len)
            .sum::<usize>()
            .saturating_sub(1);
        let message = match extra {
            0 => first,
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        };
        Err(ApiError::Validation {
            message,
            errors: self.errors,
        })
    }
}
