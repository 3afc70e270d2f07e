//! Fixed-window hit counters backing the rate limiter.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StorageError;

/// State of a key's window after recording a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitHit {
    /// Hits recorded in the current window, this one included
    pub count: u32,
    /// Time until the window resets
    pub reset_after: Duration,
}

/// Counter storage for rate limiting
///
/// A window starts with the first hit on a key and lasts `window`; the count
/// restarts from zero once it has elapsed.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one hit on `key`
    async fn hit(&self, key: &str, window: Duration) -> Result<RateLimitHit, StorageError>;

    /// Take back one hit on `key` (used to skip requests that succeeded)
    async fn release(&self, key: &str) -> Result<(), StorageError>;

    /// Forget `key` entirely
    async fn reset(&self, key: &str) -> Result<(), StorageError>;
}
