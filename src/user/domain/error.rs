//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The email address is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The role is not one of the supported roles.
    #[error("unknown user role '{0}'")]
    UnknownRole(String),

    /// The API token is empty after trimming.
    #[error("api token must not be empty")]
    EmptyApiToken,

    /// A persisted token digest is not 64 lowercase hex characters.
    #[error("invalid api token digest")]
    InvalidTokenDigest,
}

/// Error returned while parsing user roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);
