//!
//! Roster: a small user-management service and the client pieces that drive it.
//!
//! ## Core Concepts
//!
//! * **User Store (`user::UserStore`)**: The authoritative set of user records. `InMemoryUserStore`
//!   keeps them in insertion order and can persist itself to a JSON file.
//! * **API (`api`)**: The HTTP boundary. `api::router` builds an axum `Router` over an injected
//!   store; `api::protocol` holds the typed request and response records.
//! * **API Client (`client::ApiClient`)**: Issues the login/register/list/update/delete requests
//!   and normalizes every failure into `client::ClientError`.
//! * **Session Holder (`client::SessionStorage`)**: Holds at most one opaque token that the client
//!   attaches to its requests.
//! * **Views (`ui`)**: The user list and user form state machines, which report outcomes through
//!   transient notifications.

pub mod api;
pub mod client;
pub mod ui;
pub mod user;

pub use client::{ApiClient, ClientError};
pub use user::{InMemoryUserStore, UserStore, UserSummary};

/// Result type used throughout the Roster library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Roster library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured user store errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured API client errors from the client module
    #[error(transparent)]
    Client(client::ClientError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::User(_) => "user",
            Error::Client(_) => "client",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_not_found(),
            Error::Client(client_err) => client_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a rejected input.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_validation_error(),
            Error::Client(client_err) => client_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_authentication_error(),
            Error::Client(client_err) => client_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
