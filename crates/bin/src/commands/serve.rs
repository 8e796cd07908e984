//! Serve command - runs the Kiwi sync server.

use std::time::Duration;

use tokio::signal::unix::{SignalKind, signal};

use kiwi::{
    Instance, InstanceConfig,
    ratelimit::RateLimitConfig,
    server::{self, AppState, ServerConfig},
    user::HashCost,
};

use crate::cli::ServeArgs;

/// Run the Kiwi server until SIGTERM or SIGINT.
pub async fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let hash_cost = HashCost {
        memory_kib: args.hash_memory_kib,
        iterations: args.hash_iterations,
        parallelism: args.hash_parallelism,
    };
    let config = InstanceConfig::new(args.admin_token)
        .with_users_dir(args.users_dir)
        .with_data_dir(args.data_dir)
        .with_hash_cost(hash_cost);
    let instance = Instance::open(config).await?;

    let rate_limit = RateLimitConfig::new(
        Duration::from_millis(args.rate_interval_ms),
        args.rate_burst,
    );
    let server_config = ServerConfig::default()
        .with_request_timeout(Duration::from_secs(args.request_timeout))
        .with_shutdown_grace(Duration::from_secs(args.shutdown_grace))
        .with_max_body_bytes(args.max_body_bytes)
        .with_rate_limit(rate_limit);
    let grace = server_config.shutdown_grace;
    let state = AppState::new(instance, server_config)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
            _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
        }
    };

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "Kiwi sync server listening");

    server::serve(listener, server::router(state), grace, shutdown).await?;

    tracing::info!("Server shut down");
    Ok(())
}
