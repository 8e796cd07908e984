//! Storage behavior across restarts.

use reqwest::StatusCode;

use crate::helpers::{PASSWORD, relaxed_config, start_in};

#[tokio::test]
async fn test_tokens_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let server = start_in(dir.path(), relaxed_config()).await;
    server.register("alice@example.com").await;
    let login: serde_json::Value = server
        .login("alice@example.com", PASSWORD)
        .await
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap().to_string();
    server
        .push(
            &token,
            &serde_json::json!({ "files": { ".zshrc": "" }, "packages": [] }),
        )
        .await;
    server.stop().await;

    let restarted = start_in(dir.path(), relaxed_config()).await;
    let response = restarted.pull(&token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["files"][".zshrc"], "");
}

#[tokio::test]
async fn test_corrupt_record_skipped_on_startup() {
    let dir = tempfile::tempdir().unwrap();

    let server = start_in(dir.path(), relaxed_config()).await;
    let alice = server.register("alice@example.com").await;
    server.stop().await;

    std::fs::write(dir.path().join("users").join("garbage.json"), "{oops").unwrap();

    let restarted = start_in(dir.path(), relaxed_config()).await;
    assert_eq!(restarted.pull(&alice.token).await.status(), StatusCode::OK);
}
