//! Per-client rate limiting
//!
//! Fixed window admission counter keyed by client identity, shared by every
//! concurrent gateway invocation.

mod limiter;
mod types;
mod utils;


pub use limiter::RateLimiter;
pub use types::RateLimitResult;
