//! Bearer-token authentication.

use super::{error::ApiError, state::AppState};
use crate::user::domain::{User, UserId};
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

/// The user resolved from the request's `Authorization: Bearer` header.
///
/// Extracting it rejects the request with 401 when the header is missing or
/// the token is unknown.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Returns the acting user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.0
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.0.id()
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            tracing::debug!(path = parts.uri.path(), "missing bearer token");
            return Err(ApiError::Unauthenticated);
        };
        let user = state
            .users()
            .authenticate(token)
            .await?
            .ok_or(ApiError::Unauthenticated)?;
        Ok(Self(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|candidate| !candidate.is_empty())
}
