//! CLI argument definitions for the Kiwi binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kiwi::constants::{
    ADMIN_TOKEN_ENV, DEFAULT_DATA_DIR, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT, DEFAULT_RATE_BURST,
    DEFAULT_RATE_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SHUTDOWN_GRACE_SECS,
    DEFAULT_USERS_DIR,
};

/// Kiwi dotfile sync server
#[derive(Parser, Debug)]
#[command(name = "kiwi")]
#[command(about = "Kiwi: dotfile and package list sync server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Kiwi sync server
    Serve(ServeArgs),
    /// Check health of a running Kiwi server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Static admin bearer token
    #[arg(long, env = ADMIN_TOKEN_ENV, hide_env_values = true)]
    pub admin_token: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "KIWI_HOST")]
    pub host: String,

    /// Directory holding one sync document per user
    #[arg(short = 'D', long, default_value = DEFAULT_DATA_DIR, env = "KIWI_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory holding one credential record per user
    #[arg(short = 'U', long, default_value = DEFAULT_USERS_DIR, env = "KIWI_USERS_DIR")]
    pub users_dir: PathBuf,

    /// Milliseconds between rate limiter refills
    #[arg(long, default_value_t = DEFAULT_RATE_INTERVAL_MS, env = "KIWI_RATE_INTERVAL_MS")]
    pub rate_interval_ms: u64,

    /// Rate limiter burst capacity
    #[arg(long, default_value_t = DEFAULT_RATE_BURST, env = "KIWI_RATE_BURST")]
    pub rate_burst: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, env = "KIWI_REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    /// Seconds allowed for in-flight requests after a shutdown signal
    #[arg(long, default_value_t = DEFAULT_SHUTDOWN_GRACE_SECS, env = "KIWI_SHUTDOWN_GRACE")]
    pub shutdown_grace: u64,

    /// Largest accepted request body in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES, env = "KIWI_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Argon2id memory cost in KiB
    #[arg(long, default_value_t = 19456, env = "KIWI_HASH_MEMORY_KIB")]
    pub hash_memory_kib: u32,

    /// Argon2id iteration count
    #[arg(long, default_value_t = 2, env = "KIWI_HASH_ITERATIONS")]
    pub hash_iterations: u32,

    /// Argon2id lane count
    #[arg(long, default_value_t = 1, env = "KIWI_HASH_PARALLELISM")]
    pub hash_parallelism: u32,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:8080", env = "KIWI_HEALTH_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
