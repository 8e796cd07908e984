//! Registration, login and token lifecycle over HTTP.

use reqwest::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, start};

#[tokio::test]
async fn test_register_then_login() {
    let server = start().await;
    let registered = server.register("alice@example.com").await;
    assert_eq!(registered.email, "alice@example.com");
    assert!(!registered.token.is_empty());

    let response = server.login("alice@example.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["created_at"], registered.created_at.as_str());
    assert_ne!(body["token"], registered.token.as_str());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let server = start().await;
    let first = server.register("alice@example.com").await;

    let response = server
        .register_raw("alice@example.com", "another-password")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(response.text().await.unwrap(), "User already exists");

    // The original token and password are untouched.
    assert_eq!(server.pull(&first.token).await.status(), StatusCode::OK);
    assert_eq!(
        server.login("alice@example.com", PASSWORD).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_registration_validation() {
    let server = start().await;

    let response = server.register_raw("not-an-email", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server.register_raw("bob@example.com", "short").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server.post_raw("/register", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Invalid request body");

    let response = server
        .post_json("/register", &json!({ "email": "bob@example.com" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was created by the rejected attempts.
    assert_eq!(
        server.login("bob@example.com", PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let server = start().await;
    server.register("alice@example.com").await;

    let wrong_password = server.login("alice@example.com", "wrong-password").await;
    let unknown_user = server.login("nobody@example.com", PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = wrong_password.text().await.unwrap();
    let unknown_user = unknown_user.text().await.unwrap();
    assert_eq!(wrong_password, "Invalid credentials");
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_second_login_revokes_first_token() {
    let server = start().await;
    let registered = server.register("alice@example.com").await;

    let first: serde_json::Value = server
        .login("alice@example.com", PASSWORD)
        .await
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = server
        .login("alice@example.com", PASSWORD)
        .await
        .json()
        .await
        .unwrap();
    let first = first["token"].as_str().unwrap();
    let second = second["token"].as_str().unwrap();

    for stale in [registered.token.as_str(), first] {
        let response = server.pull(stale).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.text().await.unwrap(), "Invalid token");
    }
    assert_eq!(server.pull(second).await.status(), StatusCode::OK);
}
