//! Request middleware: security headers, timeouts, rate limiting and auth.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::error::ApiError;
use super::state::AppState;

const SECURE_HEADERS: [(header::HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::CONTENT_SECURITY_POLICY, "default-src 'self'"),
    (
        header::STRICT_TRANSPORT_SECURITY,
        "max-age=31536000; includeSubDomains",
    ),
];

/// Stamp the fixed security headers on every response, errors included.
pub async fn secure_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in SECURE_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

/// Fail with 408 when the inner service exceeds the configured timeout.
pub async fn request_timeout(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    tokio::time::timeout(state.config.request_timeout, next.run(request))
        .await
        .map_err(|_| {
            warn!(%method, %path, "request timed out");
            ApiError::Timeout
        })
}

/// Take one token from the global bucket or answer 429.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(err) = state.limiter.check() {
        debug!(path = %request.uri().path(), "rate limited");
        return Err(err.into());
    }
    Ok(next.run(request).await)
}

/// Resolve the bearer token into a `Principal` request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = {
        let header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        state.instance.authenticate(header).await?
    };
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
