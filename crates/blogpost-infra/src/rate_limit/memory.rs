//! In-memory per-client rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter};

use blogpost_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// Number of tracked clients above which idle entries are pruned.
const PRUNE_THRESHOLD: usize = 10_000;

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 120,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Read `RATE_LIMIT_MAX_REQUESTS` and `RATE_LIMIT_WINDOW_SECS`, keeping defaults for unset values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }

    fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(self.window / burst.get())
            .map(|quota| quota.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(burst))
    }
}

/// In-memory rate limiter using the GCRA algorithm, one bucket per key.
///
/// Note: Limits are per-process, not distributed across instances.
pub struct InMemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        tracing::debug!(
            max_requests = config.max_requests,
            window_secs = config.window.as_secs(),
            "Rate limiter configured"
        );

        Self {
            limiter: GovernorRateLimiter::keyed(config.quota()),
            clock: DefaultClock::default(),
        }
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        if self.limiter.len() > PRUNE_THRESHOLD {
            self.limiter.retain_recent();
        }

        match self.limiter.check_key(&key.to_string()) {
            Ok(_) => Ok(RateLimitResult {
                allowed: true,
                reset_after: Duration::ZERO,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                reset_after: not_until.wait_time_from(self.clock.now()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_reject() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("10.0.0.1").unwrap().allowed);
        assert!(limiter.check("10.0.0.1").unwrap().allowed);

        let third = limiter.check("10.0.0.1").unwrap();
        assert!(!third.allowed);
        assert!(third.reset_after > Duration::ZERO);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("a").unwrap().allowed);
        assert!(!limiter.check("a").unwrap().allowed);
        assert!(limiter.check("b").unwrap().allowed);
    }
}
