//! API token digests.

use super::UserDomainError;
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LENGTH: usize = 64;

/// SHA-256 digest of a bearer token, hex encoded.
///
/// Raw tokens are hashed on the way in and never persisted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiTokenDigest(String);

impl ApiTokenDigest {
    /// Hashes a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyApiToken`] when the token is blank.
    pub fn from_token(token: &str) -> Result<Self, UserDomainError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyApiToken);
        }

        let digest = Sha256::digest(trimmed.as_bytes());
        let hex = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        Ok(Self(hex))
    }

    /// Rebuilds a digest loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidTokenDigest`] unless the value is 64
    /// lowercase hex characters.
    pub fn from_hex(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let hex = value.into();
        let is_valid = hex.len() == DIGEST_HEX_LENGTH
            && hex
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !is_valid {
            return Err(UserDomainError::InvalidTokenDigest);
        }
        Ok(Self(hex))
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiTokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenDigest(..)")
    }
}
