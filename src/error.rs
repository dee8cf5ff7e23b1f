//! Error types for the role tree.

use thiserror::Error;

/// The main error type for role tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two nodes of the same tree share a role name.
    #[error("Same role name '{0}' detected. Role names should be unique in a role tree.")]
    DuplicateRoleName(String),

    /// A lookup by role name found nothing.
    #[error("Undefined role '{0}' detected. Role names should be defined before using.")]
    UnknownRole(String),
}

impl Error {
    /// The role name the error refers to.
    pub fn role(&self) -> &str {
        match self {
            Error::DuplicateRoleName(role) | Error::UnknownRole(role) => role,
        }
    }
}

/// Result type alias for role tree operations.
pub type Result<T> = std::result::Result<T, Error>;
