//! Routing, method handling and request limits.

use std::future::IntoFuture;
use std::time::Duration;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use kiwi::server::middleware;
use reqwest::StatusCode;

use crate::helpers::{app_state, relaxed_config, start, start_with};

#[tokio::test]
async fn test_health() {
    let server = start().await;
    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_wrong_method() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let response = server.client.get(server.url("/login")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text().await.unwrap(), "Method not allowed");

    let response = server.client.post(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = server
        .client
        .delete(server.url("/sync"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_path() {
    let server = start().await;
    let response = server.client.get(server.url("/api/v0")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Not found");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let server = start_with(relaxed_config().with_max_body_bytes(1024)).await;
    let user = server.register("alice@example.com").await;

    let body = serde_json::json!({
        "files": { "big": "x".repeat(4096) },
        "packages": []
    });
    let response = server.push(&user.token, &body).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_graceful_stop() {
    let server = start().await;
    assert_eq!(
        server
            .client
            .get(server.url("/health"))
            .send()
            .await
            .unwrap()
            .status(),
        StatusCode::OK
    );
    let url = server.url("/health");
    server.stop().await;

    let client = reqwest::Client::new();
    assert!(client.get(url).send().await.is_err());
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = relaxed_config().with_request_timeout(Duration::from_millis(100));
    let state = app_state(dir.path(), config).await;

    let app = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        )
        .layer(from_fn_with_state(state.clone(), middleware::request_timeout))
        .layer(from_fn(middleware::secure_headers))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(axum::serve(listener, app).into_future());

    let response = reqwest::get(format!("http://{addr}/slow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        response.headers().get("x-frame-options").unwrap(),
        "DENY"
    );
    assert_eq!(response.text().await.unwrap(), "Request timed out");
    server.abort();
}
