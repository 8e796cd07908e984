//! HTTP surface of the sync server
//!
//! Requests pass through the middleware chain outermost first:
//! security headers, request timeout, rate limiter, authentication, handler.
//! `/health` skips the rate limiter and authentication, `/register` and
//! `/login` skip authentication.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Build the complete router for the given state.
pub fn router(state: AppState) -> Router {
    let authenticated = Router::new()
        .route(
            "/sync",
            get(handlers::pull)
                .post(handlers::push)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let limited = Router::new()
        .route(
            "/register",
            post(handlers::register).fallback(handlers::method_not_allowed),
        )
        .route(
            "/login",
            post(handlers::login).fallback(handlers::method_not_allowed),
        )
        .merge(authenticated)
        .route_layer(from_fn_with_state(state.clone(), middleware::rate_limit));

    Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .merge(limited)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(from_fn_with_state(state.clone(), middleware::request_timeout))
        .layer(from_fn(middleware::secure_headers))
        .with_state(state)
}

/// Serve `app` until `shutdown` resolves, then drain for at most `grace`.
///
/// Connections still open when the grace period runs out are dropped.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    grace: Duration,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut task = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut task => return joined(result),
        () = shutdown => {}
    }

    info!(?grace, "Shutting down, waiting for in-flight requests");
    let _ = stop_tx.send(());
    match tokio::time::timeout(grace, &mut task).await {
        Ok(result) => joined(result),
        Err(_) => {
            warn!(?grace, "Grace period elapsed, closing remaining connections");
            task.abort();
            Ok(())
        }
    }
}

fn joined(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> std::io::Result<()> {
    result.map_err(std::io::Error::other)?
}
