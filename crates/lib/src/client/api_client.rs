//! HTTP client for the user service.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    errors::{ClientError, ClientResult},
    session::SessionStorage,
};
use crate::api::protocol::*;

/// The operations the client performs, each with its own failure mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Login,
    Register,
    ListUsers,
    GetUser,
    UpdateUser,
    DeleteUser,
    Health,
}

/// How a request failed before classification.
enum Failure {
    /// The request never produced a response
    Unreachable,
    /// A non-2xx response, with the server's message if it sent one
    Status(StatusCode, Option<String>),
    /// A 2xx response whose body did not have the expected shape
    Malformed,
}

impl Operation {
    fn fallback_message(self) -> &'static str {
        match self {
            Operation::Login => "Invalid email or password",
            Operation::Register => "Registration failed",
            Operation::ListUsers => "Failed to fetch users",
            Operation::GetUser => "Failed to fetch user",
            Operation::UpdateUser => "Failed to update user",
            Operation::DeleteUser => "Failed to delete user",
            Operation::Health => "Service is unreachable",
        }
    }

    fn classify(self, failure: Failure) -> ClientError {
        let (status, message) = match failure {
            Failure::Status(status, message) => (Some(status), message),
            Failure::Unreachable | Failure::Malformed => (None, None),
        };
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.fallback_message().to_string());

        match (self, status) {
            // Every login failure, including an unreachable service, is an auth failure
            (Operation::Login, _) => ClientError::Auth { message },
            (Operation::Register, Some(StatusCode::BAD_REQUEST)) => {
                ClientError::Validation { message }
            }
            (_, Some(StatusCode::UNAUTHORIZED)) => ClientError::Auth { message },
            (
                Operation::GetUser | Operation::UpdateUser | Operation::DeleteUser,
                Some(StatusCode::NOT_FOUND),
            ) => ClientError::NotFound { message },
            _ => ClientError::Server { message },
        }
    }
}

/// Client for the user service's REST API.
///
/// Each call is a single request: no retries and no batching. The current
/// session token, if any, is attached as a bearer token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStorage>,
}

impl ApiClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: Url, session: Arc<dyn SessionStorage>) -> Self {
        Self::with_http_client(base_url, session, reqwest::Client::new())
    }

    /// Create a client using a preconfigured `reqwest::Client` (e.g. with a timeout).
    pub fn with_http_client(
        mut base_url: Url,
        session: Arc<dyn SessionStorage>,
        http: reqwest::Client,
    ) -> Self {
        // Joining relative paths needs a trailing slash to keep any base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session this client reads its token from.
    pub fn session(&self) -> &Arc<dyn SessionStorage> {
        &self.session
    }

    /// Log in and store the returned token in the session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<String> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self.request(Operation::Login, Method::POST, LOGIN_PATH)?;
        let response: LoginResponse = self.send(Operation::Login, request.json(&body)).await?;

        self.session
            .set(&response.token)
            .map_err(|e| ClientError::Server {
                message: format!("Failed to store session token: {e}"),
            })?;
        Ok(response.token)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, email: &str, password: &str) -> ClientResult<RegisterResponse> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self.request(Operation::Register, Method::POST, REGISTER_PATH)?;
        self.send(Operation::Register, request.json(&body)).await
    }

    /// Fetch every user.
    pub async fn list_users(&self) -> ClientResult<Vec<UserSummary>> {
        let request = self.request(Operation::ListUsers, Method::GET, USERS_PATH)?;
        self.send(Operation::ListUsers, request).await
    }

    /// Fetch a single user.
    pub async fn get_user(&self, id: u64) -> ClientResult<UserSummary> {
        let request = self.request(Operation::GetUser, Method::GET, &user_path(id))?;
        self.send(Operation::GetUser, request).await
    }

    /// Replace the supplied fields of a user.
    pub async fn update_user(
        &self,
        id: u64,
        fields: &UpdateUserRequest,
    ) -> ClientResult<UserSummary> {
        let request = self.request(Operation::UpdateUser, Method::PUT, &user_path(id))?;
        self.send(Operation::UpdateUser, request.json(fields)).await
    }

    /// Delete a user. Deleting a missing id fails with [`ClientError::NotFound`].
    pub async fn delete_user(&self, id: u64) -> ClientResult<DeleteUserResponse> {
        let request = self.request(Operation::DeleteUser, Method::DELETE, &user_path(id))?;
        self.send(Operation::DeleteUser, request).await
    }

    /// Check that the service is up.
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let request = self.request(Operation::Health, Method::GET, HEALTH_PATH)?;
        self.send(Operation::Health, request).await
    }

    /// Drop the session.
    ///
    /// The token is revoked server-side on a best-effort basis; the local
    /// session is cleared whether or not that succeeds.
    pub async fn logout(&self) -> crate::Result<()> {
        if let Some(token) = self.session.get()
            && let Ok(url) = self.url(LOGOUT_PATH)
        {
            match self.http.post(url).bearer_auth(token).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    tracing::debug!("Server-side logout returned {}", response.status());
                }
                Err(e) => tracing::debug!("Server-side logout failed: {e}"),
            }
        }
        self.session.clear()
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }

    fn request(&self, op: Operation, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.url(path).map_err(|e| {
            tracing::warn!("Cannot build URL for {path}: {e}");
            op.classify(Failure::Unreachable)
        })?;

        let mut request = self.http.request(method, url);
        if let Some(token) = self.session.get() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation = ?op, "Request failed: {e}");
            op.classify(Failure::Unreachable)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
            tracing::debug!(operation = ?op, %status, ?message, "Request rejected");
            return Err(op.classify(Failure::Status(status, message)));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(operation = ?op, "Unrecognized response body: {e}");
            op.classify(Failure::Malformed)
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
