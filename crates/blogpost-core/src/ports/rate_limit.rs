//! Rate limiting port.

use std::time::Duration;

/// Rate limiter - abstraction over rate limiting backends.
///
/// Checks are synchronous: limiters keep their state in process, so a
/// check never waits on I/O.
pub trait RateLimiter: Send + Sync {
    /// Count a request for `key` and report whether it may proceed.
    fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
