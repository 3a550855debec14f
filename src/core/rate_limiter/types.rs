//! Rate limiter types and data structures

use tokio::time::Instant;

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Admissions counted in the current window
    pub current_count: u32,
    /// Maximum admissions per window
    pub limit: u32,
    /// Admissions left in the current window
    pub remaining: u32,
    /// Time until the window resets (in seconds)
    pub reset_after_secs: u64,
    /// Retry after (in seconds, only set when rejected; always >= 1)
    pub retry_after_secs: Option<u64>,
}

impl RateLimitResult {
    /// Unconditional admission (limiter disabled, allow-listed key, or
    /// bookkeeping unavailable)
    pub(super) fn unlimited(limit: u32) -> Self {
        Self {
            allowed: true,
            current_count: 0,
            limit,
            remaining: limit,
            reset_after_secs: 0,
            retry_after_secs: None,
        }
    }
}

/// Counter for one client key
#[derive(Debug, Clone)]
pub(super) struct RateWindow {
    /// Admissions in the current window
    pub(super) count: u32,
    /// Start of the current window
    pub(super) window_start: Instant,
}

impl RateWindow {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }
}
