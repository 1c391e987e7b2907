//! Domain model for users and API token authentication.

mod email;
mod error;
mod ids;
mod role;
mod token;
mod user;

pub use email::Email;
pub use error::{ParseUserRoleError, UserDomainError};
pub use ids::UserId;
pub use role::UserRole;
pub use token::ApiTokenDigest;
pub use user::{PersistedUserData, User};
