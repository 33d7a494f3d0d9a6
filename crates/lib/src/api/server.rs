//! HTTP service over a [`UserStore`].
//!
//! `router` builds the axum `Router`; `start` binds it to an address in a
//! background task and hands back a [`ServerHandle`].

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use tokio::{sync::oneshot, task::JoinHandle};

use super::{
    errors::{ApiError, ApiResult},
    protocol::*,
    tokens::TokenRegistry,
};
use crate::{Result, user::UserStore};

/// Service behaviour switches.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerConfig {
    /// Demand a live bearer token on the `/users` routes
    pub require_auth: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: TokenRegistry,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: ServerConfig) -> Self {
        Self {
            store,
            tokens: TokenRegistry::new(),
            config,
        }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handle_health))
        .route(LOGIN_PATH, post(handle_login))
        .route(LOGOUT_PATH, post(handle_logout))
        .route(REGISTER_PATH, post(handle_register))
        .route(USERS_PATH, get(handle_list_users))
        .route(
            USER_PATH,
            get(handle_get_user)
                .put(handle_update_user)
                .delete(handle_delete_user),
        )
        .with_state(state)
}

/// A running server started by [`start`].
///
/// Dropping the handle also shuts the server down.
#[derive(Debug)]
pub struct ServerHandle {
    address: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// The bound address (useful when binding port 0).
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Base URL for an [`ApiClient`](crate::client::ApiClient).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.task.await.map_err(std::io::Error::other)??;
        Ok(())
    }
}

/// Bind `addr` and serve the API in a background task.
pub async fn start(addr: &str, state: AppState) -> Result<ServerHandle> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Get the actual bound address (important for port 0)
    let address = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let app = router(state);
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tracing::info!("API server listening on {address}");
    Ok(ServerHandle {
        address,
        shutdown: shutdown_tx,
        task,
    })
}

/// Extract the token from an `Authorization: Bearer ...` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    if !state.config.require_auth {
        return Ok(());
    }

    let token =
        bearer_token(headers).ok_or_else(|| ApiError::unauthorized("missing session token"))?;
    match state.tokens.user_for(token).await {
        Some(_) => Ok(()),
        None => Err(ApiError::unauthorized("invalid session token")),
    }
}

// ============================================================================
// Authentication Handlers
// ============================================================================

/// Handler for POST /login
async fn handle_login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;

    let user = state
        .store
        .authenticate(&request.email, &request.password)
        .await?;
    let token = state.tokens.issue(user.id).await;

    tracing::info!(id = user.id, "User logged in");
    Ok(Json(LoginResponse { token }))
}

/// Handler for POST /logout
async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<LogoutResponse> {
    let logged_out = match bearer_token(&headers) {
        Some(token) => state.tokens.revoke(token).await,
        None => false,
    };
    Json(LogoutResponse { logged_out })
}

/// Handler for POST /register
async fn handle_register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;

    let user = state
        .store
        .create(&request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// ============================================================================
// User Handlers
// ============================================================================

/// Handler for GET /users
async fn handle_list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<UserSummary>>> {
    authorize(&state, &headers).await?;
    Ok(Json(state.store.list().await?))
}

/// Handler for GET /users/{id}
async fn handle_get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<UserSummary>> {
    let Path(id) = id?;
    authorize(&state, &headers).await?;
    Ok(Json(state.store.get_by_id(id).await?))
}

/// Handler for PUT /users/{id}
async fn handle_update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: std::result::Result<Path<u64>, PathRejection>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserSummary>> {
    let Path(id) = id?;
    authorize(&state, &headers).await?;
    let Json(update) = payload?;

    Ok(Json(state.store.update(id, update).await?))
}

/// Handler for DELETE /users/{id}
async fn handle_delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<DeleteUserResponse>> {
    let Path(id) = id?;
    authorize(&state, &headers).await?;

    state.store.delete(id).await?;
    let revoked = state.tokens.revoke_user(id).await;
    if revoked > 0 {
        tracing::debug!(id, revoked, "Revoked tokens of deleted user");
    }

    Ok(Json(DeleteUserResponse { deleted: id }))
}

// ============================================================================
// Health Handler
// ============================================================================

/// Handler for GET /health
async fn handle_health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let users = state.store.count().await?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        users,
    }))
}
