//! API integration tests
//!
//! These run against a live server with a seeded admin account
//! (admin@libris.local / admin-password). Run with:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a token for the seeded admin account
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@libris.local",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to register and log in a fresh reader account
async fn get_user_token(client: &Client, email: &str) -> String {
    client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Test Reader",
            "email": email,
            "password": "reader-password"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "reader-password"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@libris.local",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@libris.local",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email_conflicts() {
    let client = Client::new();

    let payload = json!({
        "name": "Twice Registered",
        "email": "twice@libris.local",
        "password": "some-password"
    });

    client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_profile_requires_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/users/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_profile_with_token() {
    let client = Client::new();
    let token = get_user_token(&client, "profile-test@libris.local").await;

    let response = client
        .get(format!("{}/users/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "profile-test@libris.local");
    assert!(body.get("password").is_none());
    assert!(body["borrows"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_admin_route_forbidden_for_reader() {
    let client = Client::new();
    let token = get_user_token(&client, "reader-forbidden@libris.local").await;

    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Sneaky Book",
            "author": "Nobody",
            "year": 2001,
            "code": "sneaky-001"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_admin_creates_book_and_borrow() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    // Create a book
    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "The Left Hand of Darkness",
            "author": "Ursula K. Le Guin",
            "year": 1969,
            "code": "978-0-441-47812-5"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");

    // Look it up through the public catalog
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // Register a reader and lend them the book
    let reader_token = get_user_token(&client, "borrower@libris.local").await;

    let response = client
        .get(format!("{}/users/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", reader_token))
        .send()
        .await
        .expect("Failed to send request");
    let reader: Value = response.json().await.expect("Failed to parse response");
    let reader_id = reader["id"].as_i64().expect("No user ID");

    let response = client
        .post(format!("{}/admin/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "user_id": reader_id,
            "book_id": book_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let borrow: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(borrow["status"], "borrowed");

    // The reader sees it in their history
    let response = client
        .get(format!("{}/users/me/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", reader_token))
        .send()
        .await
        .expect("Failed to send request");

    let borrows: Value = response.json().await.expect("Failed to parse response");
    assert!(borrows
        .as_array()
        .expect("Expected array")
        .iter()
        .any(|b| b["book"]["id"].as_i64() == Some(book_id)));
}

#[tokio::test]
#[ignore]
async fn test_public_catalog_needs_no_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_cookie_credential_is_accepted() {
    let client = Client::new();
    let token = get_user_token(&client, "cookie-test@libris.local").await;

    let response = client
        .get(format!("{}/users/me", BASE_URL))
        .header("Cookie", format!("token={}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}
