//! Pulling and pushing sync documents over HTTP.

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{ADMIN_TOKEN, start};

fn sample() -> Value {
    json!({
        "files": {
            ".vimrc": "set number\n",
            ".config/git/config": "[user]\n\tname = Alice\n"
        },
        "packages": [
            { "name": "vim", "version": "9.0", "installed": true },
            { "name": "ripgrep", "installed": false }
        ]
    })
}

#[tokio::test]
async fn test_pull_without_push_is_empty() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let response = server.pull(&user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "files": {}, "packages": [] }));
}

#[tokio::test]
async fn test_push_then_pull_round_trips() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let response = server.push(&user.token, &sample()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let pulled: Value = server.pull(&user.token).await.json().await.unwrap();
    assert_eq!(pulled, sample());

    // A second push replaces the document wholesale.
    let replacement = json!({ "files": { ".bashrc": "" }, "packages": [] });
    server.push(&user.token, &replacement).await;
    let pulled: Value = server.pull(&user.token).await.json().await.unwrap();
    assert_eq!(pulled, replacement);
}

#[tokio::test]
async fn test_documents_are_scoped_per_user() {
    let server = start().await;
    let alice = server.register("alice@example.com").await;
    let bob = server.register("bob@example.com").await;

    server.push(&alice.token, &sample()).await;

    let pulled: Value = server.pull(&bob.token).await.json().await.unwrap();
    assert_eq!(pulled, json!({ "files": {}, "packages": [] }));
}

#[tokio::test]
async fn test_invalid_payload_rejected() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let missing_packages = json!({ "files": {} });
    let response = server.push(&user.token, &missing_packages).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unnamed_package = json!({ "files": {}, "packages": [{ "name": "", "installed": true }] });
    let response = server.push(&user.token, &unnamed_package).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The stored document is unchanged.
    let pulled: Value = server.pull(&user.token).await.json().await.unwrap();
    assert_eq!(pulled, json!({ "files": {}, "packages": [] }));
}

#[tokio::test]
async fn test_sync_requires_token() {
    let server = start().await;

    let response = server.client.get(server.url("/sync")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text().await.unwrap(), "No token provided");

    let response = server.pull("not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text().await.unwrap(), "Invalid token");
}

#[tokio::test]
async fn test_raw_token_without_bearer_prefix() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let response = server
        .client
        .get(server.url("/sync"))
        .header("authorization", user.token.as_str())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_uses_own_partition() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let response = server.push(ADMIN_TOKEN, &sample()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let pulled: Value = server.pull(ADMIN_TOKEN).await.json().await.unwrap();
    assert_eq!(pulled, sample());

    let pulled: Value = server.pull(&user.token).await.json().await.unwrap();
    assert_eq!(pulled, json!({ "files": {}, "packages": [] }));
}
