//! Tracking gateway
//!
//! Mediates a single lookup against the upstream tracking API: rate-limit
//! admission, identifier validation, bounded upstream call, response
//! sanitization and error mapping.

mod client;
mod sanitize;


pub use client::TraceGateway;
pub use sanitize::{
    MAX_DATE_LEN, MAX_DESCRIPTION_LEN, MAX_POSITION_LEN, MAX_STATUS_LEN, sanitize_response,
};
