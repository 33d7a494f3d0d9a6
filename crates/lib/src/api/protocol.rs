//! Wire records exchanged between the API client and the service.
//!
//! Every endpoint has an explicit request and response type; the client and the
//! server both use these so the two sides cannot drift apart.

use serde::{Deserialize, Serialize};

pub use crate::user::{UserSummary, UserUpdate};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const REGISTER_PATH: &str = "/register";
pub const USERS_PATH: &str = "/users";
pub const USER_PATH: &str = "/users/{id}";
pub const HEALTH_PATH: &str = "/health";

/// Scheme prefix of the `Authorization` header carrying a session token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Body of `POST /login`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful `POST /login` response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Body of `POST /register`.
///
/// Missing fields deserialize as empty strings so the store can report them
/// as validation failures instead of the request being rejected as malformed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful `POST /register` response: the created user.
pub type RegisterResponse = UserSummary;

/// Body of `PUT /users/{id}`.
pub type UpdateUserRequest = UserUpdate;

/// Successful `DELETE /users/{id}` response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteUserResponse {
    pub deleted: u64,
}

/// Successful `POST /logout` response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    /// Whether a live token was revoked
    pub logged_out: bool,
}

/// `GET /health` response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub users: usize,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Path of a single user resource.
pub fn user_path(id: u64) -> String {
    format!("{USERS_PATH}/{id}")
}
