use std::sync::Arc;

use roster::{
    ApiClient, InMemoryUserStore, UserStore,
    api::{self, AppState, ServerConfig, ServerHandle},
    client::MemorySession,
};

// ==========================
// TEST FACTORIES
// ==========================

/// A live service on a loopback port plus a client pointed at it.
pub struct TestApp {
    pub server: ServerHandle,
    pub state: AppState,
    pub store: Arc<InMemoryUserStore>,
    pub session: Arc<MemorySession>,
    pub client: ApiClient,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url(), path)
    }

    /// A second client with its own, empty session.
    pub fn new_client(&self) -> ApiClient {
        client_for(&self.server.base_url(), Arc::new(MemorySession::new()))
    }
}

/// Start a service with default settings on an ephemeral port.
pub async fn start_app() -> TestApp {
    start_app_with(ServerConfig::default()).await
}

pub async fn start_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(InMemoryUserStore::new());
    let state = AppState::new(store.clone(), config);
    let server = api::start("127.0.0.1:0", state.clone())
        .await
        .expect("Failed to start test server");

    let session = Arc::new(MemorySession::new());
    let client = client_for(&server.base_url(), session.clone());

    TestApp {
        server,
        state,
        store,
        session,
        client,
    }
}

pub fn client_for(base_url: &str, session: Arc<MemorySession>) -> ApiClient {
    ApiClient::new(
        url::Url::parse(base_url).expect("Invalid base URL"),
        session,
    )
}

/// A client whose service is never running.
pub fn unreachable_client() -> ApiClient {
    // Bind and immediately drop a listener to find a port nobody serves
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("Failed to reserve a port")
        .port();
    client_for(
        &format!("http://127.0.0.1:{port}"),
        Arc::new(MemorySession::new()),
    )
}

/// Create a user directly in the store, bypassing HTTP.
pub async fn seed_user(app: &TestApp, email: &str, password: &str) -> roster::UserSummary {
    app.store
        .create(email, password)
        .await
        .expect("Failed to seed user")
}
