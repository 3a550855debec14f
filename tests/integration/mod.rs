//! Integration tests for btt-trace
//!
//! These tests wire real components together; only the upstream tracking
//! provider is mocked.

pub mod batch_pipeline_tests;
pub mod config_tests;
pub mod proxy_tests;
