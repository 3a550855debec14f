//! Configuration data models
//!
//! This module defines all configuration structures used by the proxy and
//! the batch client.

pub mod batch;
pub mod gateway;
pub mod logging;
pub mod rate_limit;
pub mod server;
pub mod upstream;

// Re-export all configuration types
pub use batch::*;
pub use gateway::*;
pub use logging::*;
pub use rate_limit::*;
pub use server::*;
pub use upstream::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default deployment environment
pub fn default_environment() -> String {
    "development".to_string()
}

/// Default upstream tracking endpoint
pub fn default_upstream_url() -> String {
    "https://dakotacargo.co.id/api/tracelastonly/".to_string()
}

/// Default upstream timeout in milliseconds
pub fn default_upstream_timeout_ms() -> u64 {
    10_000
}

/// Default upstream connect timeout in milliseconds
pub fn default_connect_timeout_ms() -> u64 {
    10_000
}

pub fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

/// Default admissions per window
pub fn default_max_requests() -> u32 {
    100
}

/// Default rate limit window in seconds
pub fn default_window_secs() -> u64 {
    60
}

/// Client keys admitted without counting: the in-process batch key and
/// loopback callers
pub fn default_allow_list() -> Vec<String> {
    vec![
        crate::core::batch::LOCAL_CLIENT_KEY.to_string(),
        "127.0.0.1".to_string(),
        "::1".to_string(),
    ]
}

pub fn default_max_tracked_keys() -> usize {
    100_000
}

/// Default maximum number of data lines per batch
pub fn default_max_lines() -> usize {
    1000
}

/// Default pause between batch items in milliseconds
pub fn default_pacing_ms() -> u64 {
    200
}

/// Default maximum size of a batch input file in bytes
pub fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024 // 5MB
}

pub fn default_proxy_url() -> String {
    "http://localhost:3000".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
