//! User aggregate root.

use super::{ApiTokenDigest, Email, UserId, UserRole};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A user who can authenticate and own tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    role: UserRole,
    token_digest: Option<ApiTokenDigest>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: Email,
    /// Persisted role.
    pub role: UserRole,
    /// Persisted API token digest, if a token was issued.
    pub token_digest: Option<ApiTokenDigest>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user without an API token.
    #[must_use]
    pub fn new(email: Email, role: UserRole, clock: &impl Clock) -> Self {
        let timestamp = crate::timestamp::now(clock);
        Self {
            id: UserId::new(),
            email,
            role,
            token_digest: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            role: data.role,
            token_digest: data.token_digest,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Attaches an API token digest, replacing any previous one.
    #[must_use]
    pub fn with_token_digest(mut self, digest: ApiTokenDigest) -> Self {
        self.token_digest = Some(digest);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the API token digest, if any.
    #[must_use]
    pub const fn token_digest(&self) -> Option<&ApiTokenDigest> {
        self.token_digest.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
