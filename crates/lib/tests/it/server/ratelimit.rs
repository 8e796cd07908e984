//! Global rate limiting over HTTP.

use std::time::Duration;

use kiwi::{ratelimit::RateLimitConfig, server::ServerConfig};
use reqwest::StatusCode;

use crate::helpers::start_with;

const INTERVAL: Duration = Duration::from_millis(500);

fn limited_config() -> ServerConfig {
    ServerConfig::default().with_rate_limit(RateLimitConfig::new(INTERVAL, 3))
}

#[tokio::test]
async fn test_burst_then_refill() {
    let server = start_with(limited_config()).await;

    for _ in 0..3 {
        let response = server.post_raw("/login", "{}").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    let response = server.post_raw("/login", "{}").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.text().await.unwrap(), "Too many requests");

    tokio::time::sleep(INTERVAL + Duration::from_millis(100)).await;
    let response = server.post_raw("/login", "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_limit_applies_before_auth() {
    let server = start_with(limited_config()).await;

    for _ in 0..3 {
        assert_eq!(
            server.pull("bogus").await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
    assert_eq!(
        server.pull("bogus").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_health_is_never_limited() {
    let server = start_with(limited_config()).await;

    for _ in 0..4 {
        server.post_raw("/login", "{}").await;
    }
    for _ in 0..10 {
        let response = server.client.get(server.url("/health")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
