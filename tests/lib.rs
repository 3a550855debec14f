//! Test suite for btt-trace
//!
//! ## Test Categories
//!
//! ### 1. Common Utilities (`common/`)
//! Shared fixtures: mocked upstream, configuration builders, sample CSV.
//!
//! ### 2. Integration Tests (`integration/`)
//! Tests that drive several components together:
//! - The proxy's HTTP surface against a mocked upstream
//! - Batch runs through the gateway, ending in CSV export
//!
//! ## Running Tests
//!
//! ```bash
//! # Run everything
//! cargo test
//!
//! # Run only unit tests
//! cargo test --lib
//!
//! # Run integration tests
//! cargo test --test lib
//! ```

pub mod common;
pub mod integration;
