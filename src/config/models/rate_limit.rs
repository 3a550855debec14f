//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Admissions allowed per client key per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Client keys that are always admitted
    #[serde(default = "default_allow_list")]
    pub allow_list: Vec<String>,
    /// Upper bound on tracked client keys; past it the limiter fails open
    #[serde(default = "default_max_tracked_keys")]
    pub max_tracked_keys: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            allow_list: default_allow_list(),
            max_tracked_keys: default_max_tracked_keys(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.max_requests != default_max_requests() {
            self.max_requests = other.max_requests;
        }
        if other.window_secs != default_window_secs() {
            self.window_secs = other.window_secs;
        }
        if other.max_tracked_keys != default_max_tracked_keys() {
            self.max_tracked_keys = other.max_tracked_keys;
        }
        if other.allow_list != default_allow_list() {
            self.allow_list = other.allow_list;
        }
        self
    }
}
