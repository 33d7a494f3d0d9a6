//! API client and session holder tests against a live service.

use std::sync::Arc;

use roster::{
    ClientError,
    api::ServerConfig,
    client::{FileSession, SessionStorage},
    user::UserUpdate,
};

use crate::helpers::*;

/// A session that can be read but never written.
struct ReadOnlySession;

impl SessionStorage for ReadOnlySession {
    fn set(&self, _token: &str) -> roster::Result<()> {
        Err(std::io::Error::other("read-only session").into())
    }

    fn get(&self) -> Option<String> {
        None
    }

    fn clear(&self) -> roster::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_login_stores_token_in_session() {
    let app = start_app().await;
    seed_user(&app, "a@x.com", "p1").await;
    assert_eq!(app.session.get(), None);

    let token = app.client.login("a@x.com", "p1").await.unwrap();
    assert_eq!(app.session.get().as_deref(), Some(token.as_str()));

    // Logging in again replaces the token
    let second = app.client.login("a@x.com", "p1").await.unwrap();
    assert_ne!(token, second);
    assert_eq!(app.session.get().as_deref(), Some(second.as_str()));
}

#[tokio::test]
async fn test_login_failure_is_auth_and_keeps_session_empty() {
    let app = start_app().await;
    seed_user(&app, "a@x.com", "p1").await;

    let err = app.client.login("a@x.com", "nope").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Auth {
            message: "Invalid email or password".to_string()
        }
    );
    assert_eq!(app.session.get(), None);
}

#[tokio::test]
async fn test_login_with_unwritable_session_is_server_error() {
    let app = start_app().await;
    seed_user(&app, "a@x.com", "p1").await;
    let client = roster::ApiClient::new(
        url::Url::parse(&app.server.base_url()).unwrap(),
        Arc::new(ReadOnlySession),
    );

    let err = client.login("a@x.com", "p1").await.unwrap_err();
    assert!(err.is_server_error());
    assert!(err.message().starts_with("Failed to store session token"));
}

#[tokio::test]
async fn test_register_validation_and_success() {
    let app = start_app().await;

    let err = app.client.register("  ", "p1").await.unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(err.message(), "email is required");

    let user = app.client.register("a@x.com", "p1").await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@x.com");

    // Registering does not log in
    assert_eq!(app.session.get(), None);
}

#[tokio::test]
async fn test_crud_round_through_client() {
    let app = start_app().await;
    let created = app.client.register("a@x.com", "p1").await.unwrap();

    let users = app.client.list_users().await.unwrap();
    assert_eq!(users, vec![created.clone()]);
    assert_eq!(app.client.get_user(created.id).await.unwrap(), created);

    let updated = app
        .client
        .update_user(created.id, &UserUpdate::email("b@x.com"))
        .await
        .unwrap();
    assert_eq!(updated.email, "b@x.com");
    app.client.login("b@x.com", "p1").await.unwrap();

    let deleted = app.client.delete_user(created.id).await.unwrap();
    assert_eq!(deleted.deleted, created.id);

    let err = app.client.delete_user(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), format!("User not found: {}", created.id));

    let err = app.client.get_user(created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let app = start_app().await;
    let err = app
        .client
        .update_user(99, &UserUpdate::password("p2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn test_unreachable_service_maps_to_fallback_messages() {
    let client = unreachable_client();

    let err = client.list_users().await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.message(), "Failed to fetch users");

    let err = client.delete_user(1).await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.message(), "Failed to delete user");

    let err = client.login("a@x.com", "p1").await.unwrap_err();
    assert!(err.is_authentication_error());

    let err = client.register("a@x.com", "p1").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.message(), "Registration failed");
}

#[tokio::test]
async fn test_logout_clears_session_and_revokes_token() {
    let app = start_app_with(ServerConfig { require_auth: true }).await;
    seed_user(&app, "a@x.com", "p1").await;

    let err = app.client.list_users().await.unwrap_err();
    assert!(err.is_authentication_error());

    app.client.login("a@x.com", "p1").await.unwrap();
    assert_eq!(app.client.list_users().await.unwrap().len(), 1);
    assert_eq!(app.state.tokens.token_count().await, 1);

    app.client.logout().await.unwrap();
    assert_eq!(app.session.get(), None);
    assert_eq!(app.state.tokens.token_count().await, 0);

    let err = app.client.list_users().await.unwrap_err();
    assert!(err.is_authentication_error());

    // Logging out without a session is a no-op
    app.client.logout().await.unwrap();
}

#[tokio::test]
async fn test_logout_succeeds_when_service_is_down() {
    let client = unreachable_client();
    client.session().set("stale").unwrap();

    client.logout().await.unwrap();
    assert_eq!(client.session().get(), None);
}

#[tokio::test]
async fn test_file_session_is_shared_between_clients() {
    let app = start_app_with(ServerConfig { require_auth: true }).await;
    seed_user(&app, "a@x.com", "p1").await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = roster::ApiClient::new(
        url::Url::parse(&app.server.base_url()).unwrap(),
        Arc::new(FileSession::new(&path)),
    );
    first.login("a@x.com", "p1").await.unwrap();

    // A later process reading the same file is already logged in
    let second = roster::ApiClient::new(
        url::Url::parse(&app.server.base_url()).unwrap(),
        Arc::new(FileSession::new(&path)),
    );
    assert_eq!(second.list_users().await.unwrap().len(), 1);

    second.logout().await.unwrap();
    assert!(first.list_users().await.unwrap_err().is_authentication_error());
}

#[tokio::test]
async fn test_health_and_stopped_server() {
    let app = start_app().await;
    let client = app.new_client();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.users, 0);

    app.server.stop().await.unwrap();
    assert!(client.health().await.unwrap_err().is_server_error());
}
