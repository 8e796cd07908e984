//! Constants shared across the server.

/// Minimum accepted password length in bytes.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of random bytes in an issued bearer token.
pub const TOKEN_BYTES: usize = 32;

/// File name of the per-user sync document.
pub const SYNC_FILE_NAME: &str = "sync_data.json";

/// File extension of credential records.
pub const RECORD_EXTENSION: &str = "json";

/// Optional prefix of the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Environment variable holding the admin credential.
pub const ADMIN_TOKEN_ENV: &str = "KIWI_AUTH_TOKEN";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory holding per-user sync documents.
pub const DEFAULT_DATA_DIR: &str = "/opt/kiwi/data";

/// Default directory holding credential records.
pub const DEFAULT_USERS_DIR: &str = "/opt/kiwi/users";

/// Default rate-limiter refill interval in milliseconds.
pub const DEFAULT_RATE_INTERVAL_MS: u64 = 1000;

/// Default rate-limiter burst capacity.
pub const DEFAULT_RATE_BURST: u32 = 10;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default shutdown grace period in seconds.
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Default request body limit (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
