//! HTTP service tests, driven with raw requests so status codes and bodies
//! can be checked exactly.

use reqwest::StatusCode;
use roster::api::ServerConfig;
use serde_json::{Value, json};

use crate::helpers::*;

async fn post_json(app: &TestApp, path: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(app.url(path))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn get_json(app: &TestApp, path: &str) -> Value {
    let response = reqwest::get(app.url(path)).await.unwrap();
    response.json().await.unwrap()
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_user_lifecycle() {
    let app = start_app().await;
    let http = reqwest::Client::new();

    // Register
    let response = post_json(
        &app,
        "/register",
        json!({"email": "a@x.com", "password": "p1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created, json!({"id": 1, "email": "a@x.com"}));

    // Login
    let response = post_json(&app, "/login", json!({"email": "a@x.com", "password": "p1"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());

    // List exposes only id and email
    let users = get_json(&app, "/users").await;
    assert_eq!(users, json!([{"id": 1, "email": "a@x.com"}]));

    // Update the email only
    let response = http
        .put(app.url("/users/1"))
        .json(&json!({"email": "b@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated, json!({"id": 1, "email": "b@x.com"}));

    // The old password still works with the new email
    let response = post_json(&app, "/login", json!({"email": "b@x.com", "password": "p1"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Delete, then delete again
    let response = http.delete(app.url("/users/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"deleted": 1}));

    let response = http.delete(app.url("/users/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(response).await, "User not found: 1");

    let users = get_json(&app, "/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_get_single_user() {
    let app = start_app().await;
    let user = seed_user(&app, "a@x.com", "p1").await;

    let response = reqwest::get(app.url(&format!("/users/{}", user.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"id": user.id, "email": "a@x.com"}));

    let response = reqwest::get(app.url("/users/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    let app = start_app().await;
    seed_user(&app, "a@x.com", "p1").await;

    let response = post_json(
        &app,
        "/login",
        json!({"email": "a@x.com", "password": "wrong"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(response).await, "Invalid email or password");

    // Unknown email looks the same as a wrong password
    let response = post_json(&app, "/login", json!({"email": "z@x.com", "password": "p1"})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(response).await, "Invalid email or password");
}

#[tokio::test]
async fn test_register_requires_email_and_password() {
    let app = start_app().await;

    let response = post_json(&app, "/register", json!({"email": "", "password": "p1"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "email is required");

    let response = post_json(&app, "/register", json!({"email": "a@x.com"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "password is required");

    let users = get_json(&app, "/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_malformed_bodies_and_ids_are_bad_requests() {
    let app = start_app().await;
    seed_user(&app, "a@x.com", "p1").await;
    let http = reqwest::Client::new();

    for path in ["/login", "/register"] {
        let response = http
            .post(app.url(path))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(error_message(response).await, "invalid json format");
    }

    let response = http
        .put(app.url("/users/1"))
        .header("content-type", "application/json")
        .body("[1, 2")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = http.get(app.url("/users/abc")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "invalid user id");
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let app = start_app().await;

    let response = reqwest::Client::new()
        .put(app.url("/users/7"))
        .json(&json!({"email": "b@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(response).await, "User not found: 7");
}

#[tokio::test]
async fn test_update_with_empty_fields_keeps_values() {
    let app = start_app().await;
    let user = seed_user(&app, "a@x.com", "p1").await;

    let response = reqwest::Client::new()
        .put(app.url(&format!("/users/{}", user.id)))
        .json(&json!({"email": "", "password": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "a@x.com");

    let response = post_json(&app, "/login", json!({"email": "a@x.com", "password": "p1"})).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_user_count() {
    let app = start_app().await;
    seed_user(&app, "a@x.com", "p1").await;

    let body = get_json(&app, "/health").await;
    assert_eq!(body, json!({"status": "healthy", "users": 1}));
}

#[tokio::test]
async fn test_require_auth_guards_user_routes() {
    let app = start_app_with(ServerConfig { require_auth: true }).await;
    seed_user(&app, "a@x.com", "p1").await;
    let http = reqwest::Client::new();

    let response = http.get(app.url("/users")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = http
        .get(app.url("/users"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(response).await, "invalid session token");

    let body: Value = post_json(&app, "/login", json!({"email": "a@x.com", "password": "p1"}))
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let response = http.get(app.url("/users")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Registration and health stay open
    let response = post_json(
        &app,
        "/register",
        json!({"email": "b@x.com", "password": "p2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = http.get(app.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Logout revokes the token
    let body: Value = http
        .post(app.url("/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"logged_out": true}));

    let response = http.get(app.url("/users")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleting_user_revokes_their_tokens() {
    let app = start_app().await;
    let user = seed_user(&app, "a@x.com", "p1").await;

    post_json(&app, "/login", json!({"email": "a@x.com", "password": "p1"})).await;
    assert_eq!(app.state.tokens.token_count().await, 1);

    let response = reqwest::Client::new()
        .delete(app.url(&format!("/users/{}", user.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.state.tokens.token_count().await, 0);
}
