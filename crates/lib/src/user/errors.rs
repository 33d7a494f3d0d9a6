//! Error types for the user store
use thiserror::Error;

/// Errors that can occur during user store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UserError {
    /// A required field was missing or blank.
    #[error("{field} is required")]
    EmptyField {
        /// Name of the missing field
        field: &'static str,
    },

    /// No user with the given id exists.
    #[error("User not found: {id}")]
    NotFound {
        /// The id that was looked up
        id: u64,
    },

    /// Email and password did not match any user.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Hashing a password failed.
    #[error("Password hashing failed: {reason}")]
    PasswordHash {
        /// Underlying hasher message
        reason: String,
    },

    /// The persisted store could not be read back.
    #[error("Unsupported store file: {reason}")]
    UnsupportedFormat {
        /// What was wrong with the file
        reason: String,
    },
}

impl UserError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::NotFound { .. })
    }

    /// Check if this error is a rejected input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, UserError::EmptyField { .. })
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, UserError::InvalidCredentials)
    }

    /// The user id this error refers to, if any.
    pub fn user_id(&self) -> Option<u64> {
        match self {
            UserError::NotFound { id } => Some(*id),
            _ => None,
        }
    }
}

impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
