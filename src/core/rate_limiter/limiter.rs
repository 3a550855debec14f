//! Core rate limiter implementation

use super::types::{RateLimitResult, RateWindow};
use crate::config::RateLimitConfig;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Longest an admission check waits for the counter table before admitting
/// without bookkeeping.
const LOCK_BUDGET: Duration = Duration::from_millis(250);

/// Rate limiter implementation
#[derive(Clone)]
pub struct RateLimiter {
    /// Rate limit configuration
    pub(super) config: RateLimitConfig,
    /// Counters by client key (IP address or other caller identity)
    pub(super) entries: Arc<RwLock<HashMap<String, RateWindow>>>,
    /// Keys admitted unconditionally
    pub(super) allow_list: Arc<HashSet<String>>,
    /// Window duration
    pub(super) window: Duration,
}

impl RateLimiter {
    /// Create a new rate limiter using the configured window
    pub fn new(config: RateLimitConfig) -> Self {
        let window = config.window();
        Self::with_window(config, window)
    }

    /// Create a rate limiter with custom window
    pub fn with_window(config: RateLimitConfig, window: Duration) -> Self {
        let allow_list = config.allow_list.iter().cloned().collect();
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
            allow_list: Arc::new(allow_list),
            window,
        }
    }

    fn bypasses(&self, key: &str) -> bool {
        !self.config.enabled || self.allow_list.contains(key)
    }

    /// Atomically check and record an admission for `key`.
    ///
    /// The read-modify-write happens under a single write lock, so
    /// concurrent calls for the same key never admit more than the limit
    /// within one window. If the counter table cannot be updated the call
    /// is admitted.
    pub async fn admit(&self, key: &str) -> RateLimitResult {
        let limit = self.config.max_requests;

        if self.bypasses(key) {
            return RateLimitResult::unlimited(limit);
        }

        let mut entries = match tokio::time::timeout(LOCK_BUDGET, self.entries.write()).await {
            Ok(entries) => entries,
            Err(_) => {
                warn!("Rate limiter table busy, admitting {} without counting", key);
                return RateLimitResult::unlimited(limit);
            }
        };

        let now = Instant::now();

        if !entries.contains_key(key) && entries.len() >= self.config.max_tracked_keys {
            let window = self.window;
            entries.retain(|_, entry| now.duration_since(entry.window_start) < window);

            if entries.len() >= self.config.max_tracked_keys {
                warn!(
                    "Rate limiter tracking {} keys, admitting {} without counting",
                    entries.len(),
                    key
                );
                return RateLimitResult::unlimited(limit);
            }
        }

        // Avoid String allocation if key already exists
        let entry = if let Some(e) = entries.get_mut(key) {
            e
        } else {
            entries
                .entry(key.to_string())
                .or_insert_with(|| RateWindow::new(now))
        };

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        let reset_after = self
            .window
            .saturating_sub(now.duration_since(entry.window_start));
        let reset_after_secs = ceil_secs(reset_after);

        if entry.count < limit {
            entry.count += 1;
            return RateLimitResult {
                allowed: true,
                current_count: entry.count,
                limit,
                remaining: limit - entry.count,
                reset_after_secs,
                retry_after_secs: None,
            };
        }

        debug!(
            "Rate limit exceeded for {}: {}/{} requests",
            key, entry.count, limit
        );

        RateLimitResult {
            allowed: false,
            current_count: entry.count,
            limit,
            remaining: 0,
            reset_after_secs,
            retry_after_secs: Some(reset_after_secs.max(1)),
        }
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
