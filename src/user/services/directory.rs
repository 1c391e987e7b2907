//! Service layer for user registration and token authentication.

use crate::user::{
    domain::{ApiTokenDigest, Email, User, UserDomainError, UserId, UserRole},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    role: String,
    api_token: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required user fields.
    #[must_use]
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
            api_token: None,
        }
    }

    /// Issues the given raw API token to the new user.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("api_token", &self.api_token.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User registration, lookup and authentication service.
pub struct UserDirectory<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectory<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user, hashing the API token when one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] when validation fails or the repository
    /// rejects the user (for example a duplicate email).
    pub async fn register(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let RegisterUserRequest {
            email,
            role,
            api_token,
        } = request;

        let parsed_email = Email::new(email)?;
        let parsed_role = UserRole::try_from(role.as_str())
            .map_err(|err| UserDomainError::UnknownRole(err.0))?;
        let mut user = User::new(parsed_email, parsed_role, &*self.clock);
        if let Some(token) = api_token {
            user = user.with_token_digest(ApiTokenDigest::from_token(&token)?);
        }

        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Resolves the user holding a raw bearer token.
    ///
    /// Blank tokens never match.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when the lookup fails.
    pub async fn authenticate(&self, token: &str) -> UserDirectoryResult<Option<User>> {
        let Ok(digest) = ApiTokenDigest::from_token(token) else {
            return Ok(None);
        };
        Ok(self.repository.find_by_token(&digest).await?)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] when the email is malformed or
    /// [`UserDirectoryError::Repository`] when the lookup fails.
    pub async fn find_by_email(&self, email: &str) -> UserDirectoryResult<Option<User>> {
        let parsed = Email::new(email)?;
        Ok(self.repository.find_by_email(&parsed).await?)
    }
}
