//! Shared application state.

use std::sync::Arc;

use super::config::ServerConfig;
use crate::Result;
use crate::instance::Instance;
use crate::ratelimit::RateLimiter;

/// State handed to every handler and middleware.
#[derive(Clone, Debug)]
pub struct AppState {
    pub instance: Instance,
    pub limiter: Arc<RateLimiter>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with a limiter driven by the system clock.
    pub fn new(instance: Instance, config: ServerConfig) -> Result<Self> {
        let limiter = RateLimiter::new(config.rate_limit)?;
        Ok(Self::with_limiter(instance, config, Arc::new(limiter)))
    }

    pub fn with_limiter(instance: Instance, config: ServerConfig, limiter: Arc<RateLimiter>) -> Self {
        Self {
            instance,
            limiter,
            config: Arc::new(config),
        }
    }
}
