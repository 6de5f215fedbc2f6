//! Integration tests for the auth service.
//!
//! These tests require:
//! - dynamodb-local with provisioned tables (sole-cli provision)
//! - The auth service running (cargo run -p solestack-auth)
//!
//! Run with: cargo test -p solestack-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the auth API (configurable via environment).
fn auth_base_url() -> String {
    std::env::var("AUTH_BASE_URL").unwrap_or_else(|_| "http://localhost:4001".to_string())
}

/// A unique email, so re-runs never collide with earlier accounts.
fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

/// Test helper: register an account and return the response body.
async fn register(client: &Client, email: &str, password: &str) -> Value {
    let base_url = auth_base_url();
    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse register response")
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_register_returns_token_and_role() {
    let client = Client::new();
    let email = unique_email();

    let body = register(&client, &email, "s3cret-pass").await;

    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "USER");
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));

    // The stored hash must never leave the service.
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_register_duplicate_email_rejected() {
    let client = Client::new();
    let email = unique_email();
    let base_url = auth_base_url();

    register(&client, &email, "s3cret-pass").await;

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({"email": email, "password": "another-pass"}))
        .send()
        .await
        .expect("Failed to send duplicate register");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_register_missing_password_rejected() {
    let client = Client::new();
    let base_url = auth_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({"email": unique_email()}))
        .send()
        .await
        .expect("Failed to send register");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Email and password are required");
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_register_malformed_email_rejected() {
    let client = Client::new();
    let base_url = auth_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({"email": "not-an-email", "password": "s3cret-pass"}))
        .send()
        .await
        .expect("Failed to send register");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Invalid email address");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_login_roundtrip() {
    let client = Client::new();
    let email = unique_email();
    let base_url = auth_base_url();

    let registered = register(&client, &email, "s3cret-pass").await;

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({"email": email, "password": "s3cret-pass"}))
        .send()
        .await
        .expect("Failed to login");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse login response");
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["id"], registered["id"]);
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_login_wrong_password_rejected() {
    let client = Client::new();
    let email = unique_email();
    let base_url = auth_base_url();

    register(&client, &email, "s3cret-pass").await;

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({"email": email, "password": "wrong-pass"}))
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_login_unknown_email_gets_same_answer_as_wrong_password() {
    let client = Client::new();
    let base_url = auth_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({"email": unique_email(), "password": "s3cret-pass"}))
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Invalid credentials");
}

// ============================================================================
// Current User Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_me_returns_profile() {
    let client = Client::new();
    let email = unique_email();
    let base_url = auth_base_url();

    let registered = register(&client, &email, "s3cret-pass").await;
    let token = registered["token"].as_str().expect("register returns token");

    let resp = client
        .get(format!("{base_url}/api/auth/me"))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to get current user");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse profile");
    assert_eq!(body["id"], registered["id"]);
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "USER");
    assert!(body["createdAt"].as_str().is_some());
    assert!(body["updatedAt"].as_str().is_some());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_me_without_token_rejected() {
    let client = Client::new();
    let base_url = auth_base_url();

    let resp = client
        .get(format!("{base_url}/api/auth/me"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Not authorized, no token");
}

#[tokio::test]
#[ignore = "Requires running auth service"]
async fn test_me_with_garbage_token_rejected() {
    let client = Client::new();
    let base_url = auth_base_url();

    let resp = client
        .get(format!("{base_url}/api/auth/me"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Not authorized, token failed");
}
