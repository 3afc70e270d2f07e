//! In-memory fixed-window counters

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use dv_core::errors::StorageError;
use dv_core::repositories::{RateLimitHit, RateLimitStore};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: Instant,
}

impl Window {
    fn starting(now: Instant, length: Duration) -> Self {
        Self {
            count: 0,
            resets_at: now + length,
        }
    }
}

/// Process-local rate limit counters
///
/// Keys are locked per shard, so hits on different clients do not contend.
/// Expired windows restart on access and are pruned whenever the map grows
/// past `prune_threshold` entries.
#[derive(Clone)]
pub struct InMemoryRateLimitStore {
    windows: Arc<DashMap<String, Window>>,
    prune_threshold: usize,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::with_prune_threshold(10_000)
    }

    pub fn with_prune_threshold(prune_threshold: usize) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            prune_threshold,
        }
    }

    /// Number of tracked keys, expired windows included
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(&self, key: &str, window: Duration) -> Result<RateLimitHit, StorageError> {
        let now = Instant::now();

        if self.windows.len() >= self.prune_threshold {
            self.windows.retain(|_, w| w.resets_at > now);
        }

        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window::starting(now, window));
        if entry.resets_at <= now {
            *entry = Window::starting(now, window);
        }
        entry.count = entry.count.saturating_add(1);

        Ok(RateLimitHit {
            count: entry.count,
            reset_after: entry.resets_at.saturating_duration_since(now),
        })
    }

    async fn release(&self, key: &str) -> Result<(), StorageError> {
        if let Some(mut window) = self.windows.get_mut(key) {
            window.count = window.count.saturating_sub(1);
        }
        Ok(())
    }

    async fn reset(&self, key: &str) -> Result<(), StorageError> {
        self.windows.remove(key);
        Ok(())
    }
}
