//! Core functionality for the tracking gateway
//!
//! This module contains the lookup pipeline and the data it produces.

pub mod batch;
pub mod export; // CSV export of batch results
pub mod gateway; // Single upstream lookup
pub mod rate_limiter; // Per-client fixed-window admission
pub mod types;
pub mod validator;
