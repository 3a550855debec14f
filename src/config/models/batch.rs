//! Batch client configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of data lines accepted in one run
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Pause between two identifiers, in milliseconds
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    /// Maximum input file size in bytes
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Base URL of the tracking proxy
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            pacing_ms: default_pacing_ms(),
            max_file_bytes: default_max_file_bytes(),
            proxy_url: default_proxy_url(),
        }
    }
}

impl BatchConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Set pacing interval
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing_ms = pacing.as_millis() as u64;
        self
    }

    /// Set line limit
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Merge batch configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_lines != default_max_lines() {
            self.max_lines = other.max_lines;
        }
        if other.pacing_ms != default_pacing_ms() {
            self.pacing_ms = other.pacing_ms;
        }
        if other.max_file_bytes != default_max_file_bytes() {
            self.max_file_bytes = other.max_file_bytes;
        }
        if other.proxy_url != default_proxy_url() {
            self.proxy_url = other.proxy_url;
        }
        self
    }
}
