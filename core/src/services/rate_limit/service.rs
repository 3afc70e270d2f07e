//! Rate limit decisions

use std::sync::Arc;
use std::time::Duration;

use dv_shared::config::WindowLimit;

use crate::errors::StorageError;
use crate::repositories::RateLimitStore;

/// Outcome of counting one request against a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, rounded up
    pub fn reset_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

/// Counts requests per key and decides whether they may proceed
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Record a hit on `key` and compare the window count against `limit`
    pub async fn check(&self, key: &str, limit: WindowLimit) -> Result<RateLimitDecision, StorageError> {
        let hit = self
            .store
            .hit(key, Duration::from_secs(limit.window_seconds))
            .await?;

        let allowed = hit.count <= limit.max;
        if !allowed {
            tracing::warn!(key = %key, count = hit.count, limit = limit.max, "rate limit exceeded");
        }

        Ok(RateLimitDecision {
            allowed,
            limit: limit.max,
            remaining: limit.max.saturating_sub(hit.count),
            reset_after: hit.reset_after,
        })
    }

    /// Take back a hit recorded by [`check`](Self::check)
    pub async fn release(&self, key: &str) -> Result<(), StorageError> {
        self.store.release(key).await
    }
}
