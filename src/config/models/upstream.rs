//! Upstream tracking API configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream tracking API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Tracking endpoint; the identifier is appended as the `b` query parameter
    #[serde(default = "default_upstream_url")]
    pub base_url: String,
    /// Total request budget in milliseconds
    #[serde(default = "default_upstream_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// User agent sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            timeout_ms: default_upstream_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Merge upstream configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_upstream_url() {
            self.base_url = other.base_url;
        }
        if other.timeout_ms != default_upstream_timeout_ms() {
            self.timeout_ms = other.timeout_ms;
        }
        if other.connect_timeout_ms != default_connect_timeout_ms() {
            self.connect_timeout_ms = other.connect_timeout_ms;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        self
    }
}
