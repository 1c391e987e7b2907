//! Application services for the user directory.

mod directory;

pub use directory::{RegisterUserRequest, UserDirectory, UserDirectoryError, UserDirectoryResult};
