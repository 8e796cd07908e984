//! Security headers on every response.

use reqwest::{Response, StatusCode};

use crate::helpers::start;

fn assert_secure_headers(response: &Response) {
    let headers = response.headers();
    let expected = [
        ("x-content-type-options", "nosniff"),
        ("x-frame-options", "DENY"),
        ("x-xss-protection", "1; mode=block"),
        ("content-security-policy", "default-src 'self'"),
        (
            "strict-transport-security",
            "max-age=31536000; includeSubDomains",
        ),
    ];
    for (name, value) in expected {
        assert_eq!(
            headers.get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "{name} on {} response",
            response.status()
        );
    }
}

#[tokio::test]
async fn test_secure_headers_on_every_response() {
    let server = start().await;
    let user = server.register("alice@example.com").await;

    let responses = vec![
        (
            server.client.get(server.url("/health")).send().await.unwrap(),
            StatusCode::OK,
        ),
        (server.pull(&user.token).await, StatusCode::OK),
        (server.pull("bogus").await, StatusCode::UNAUTHORIZED),
        (server.post_raw("/login", "nope").await, StatusCode::BAD_REQUEST),
        (
            server.client.get(server.url("/register")).send().await.unwrap(),
            StatusCode::METHOD_NOT_ALLOWED,
        ),
        (
            server.client.get(server.url("/missing")).send().await.unwrap(),
            StatusCode::NOT_FOUND,
        ),
    ];
    for (response, status) in &responses {
        assert_eq!(response.status(), *status);
        assert_secure_headers(response);
    }
}
