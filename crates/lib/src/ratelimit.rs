//! Global request admission control
//!
//! A single token bucket shared by every request in the process. The bucket
//! starts full at `burst` tokens and regains one token per `refill_interval`,
//! never exceeding `burst`. Each admitted request consumes one token.
//!
//! # Concurrency
//!
//! The bucket lives behind a [`Mutex`]; [`RateLimiter::check`] takes the lock,
//! refills from the elapsed time, and consumes a token in one critical
//! section, so concurrent callers can never jointly spend more tokens than the
//! bucket holds. The lock is never held across an `.await`. Share one limiter
//! between tasks with an `Arc`.
//!
//! Refill is measured on the monotonic clock, so wall-clock adjustments never
//! stall or accelerate admission.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::constants::{DEFAULT_RATE_BURST, DEFAULT_RATE_INTERVAL_MS};
use crate::instance::InstanceError;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Time to regain one token
    pub refill_interval: Duration,
    /// Bucket capacity
    pub burst: u32,
}

impl RateLimitConfig {
    pub fn new(refill_interval: Duration, burst: u32) -> Self {
        Self {
            refill_interval,
            burst,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.refill_interval.is_zero() {
            return Err(InstanceError::InvalidConfig {
                reason: "rate limit refill interval must be positive".to_string(),
            }
            .into());
        }
        if self.burst == 0 {
            return Err(InstanceError::InvalidConfig {
                reason: "rate limit burst must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_RATE_INTERVAL_MS),
            DEFAULT_RATE_BURST,
        )
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        config.validate()?;
        let bucket = Bucket {
            tokens: f64::from(config.burst),
            last_refill: Instant::now(),
        };
        Ok(Self {
            config,
            bucket: Mutex::new(bucket),
        })
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Admit one request, or fail with [`Error::RateLimited`].
    pub fn check(&self) -> Result<()> {
        let now = Instant::now();
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut bucket, now);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            Err(Error::RateLimited)
        }
    }

    /// Whole tokens currently available.
    pub fn available(&self) -> u32 {
        let now = Instant::now();
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut bucket, now);
        bucket.tokens.floor() as u32
    }

    fn refill(&self, bucket: &mut Bucket, now: Instant) {
        let elapsed = now.saturating_duration_since(bucket.last_refill);
        let gained = elapsed.as_secs_f64() / self.config.refill_interval.as_secs_f64();
        bucket.tokens = (bucket.tokens + gained).min(f64::from(self.config.burst));
        bucket.last_refill = bucket.last_refill.max(now);
    }
}
