//! Utility functions for rate limiter

use super::limiter::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

impl RateLimiter {
    /// Drop counters whose window has elapsed
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.window_start) < window);

        if before != entries.len() {
            debug!("Rate limiter evicted {} expired keys", before - entries.len());
        }
    }

    /// Start background cleanup task, ticking once per window
    pub fn start_cleanup_task(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.window.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                self.cleanup().await;
            }
        })
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    #[cfg(test)]
    pub(super) async fn tracked_keys(&self) -> usize {
        self.entries.read().await.len()
    }
}
