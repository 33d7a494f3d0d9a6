//! Error taxonomy of the API client.
use thiserror::Error;

/// Every failure the API client can report.
///
/// Each variant carries a human-readable message: the server's `error` field
/// when it sent one, otherwise a fallback chosen per operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A required field was missing or malformed.
    #[error("{message}")]
    Validation { message: String },

    /// Bad credentials or a rejected session token.
    #[error("{message}")]
    Auth { message: String },

    /// The operation targeted an id that does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// Unreachable service, unrecognized response, or any other failure.
    #[error("{message}")]
    Server { message: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation { message }
            | ClientError::Auth { message }
            | ClientError::NotFound { message }
            | ClientError::Server { message } => message,
        }
    }

    /// Short name of the error kind, for logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Validation { .. } => "validation",
            ClientError::Auth { .. } => "auth",
            ClientError::NotFound { .. } => "not_found",
            ClientError::Server { .. } => "server",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// Check if this error is a rejected input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, ClientError::Auth { .. })
    }

    /// Check if this error is a catch-all server failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ClientError::Server { .. })
    }
}

impl From<ClientError> for crate::Error {
    fn from(err: ClientError) -> Self {
        crate::Error::Client(err)
    }
}
