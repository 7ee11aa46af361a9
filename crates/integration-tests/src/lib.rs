//! Integration tests for the Royal Trust BD API.
//!
//! The tests talk HTTP to a running server and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! rt-cli migrate && rt-cli seed
//! cargo run -p royal-trust-server &
//! cargo test -p royal-trust-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `API_BASE_URL` - server under test (default `http://localhost:5000`)
//! - `ADMIN_USERNAME`, `ADMIN_PASSWORD` - the configured admin pair

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:5000".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// A client with a cookie jar, so a login session carries over.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as the configured admin and return the session-carrying client.
///
/// # Panics
///
/// Panics if the admin credentials are not set or the login fails.
pub async fn admin_client() -> Client {
    let username = std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME not set");
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD not set");

    let client = client();
    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK, "admin login failed");

    client
}

/// Read a JSON body.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json_body(resp: reqwest::Response) -> Value {
    resp.json().await.expect("Response was not JSON")
}
