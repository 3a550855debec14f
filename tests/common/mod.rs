//! Common test utilities for btt-trace
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, upstream};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let upstream = upstream::MockUpstream::start().await;
//!     let config = fixtures::config_for(&upstream);
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod upstream;

pub use fixtures::{config_for, gateway_for, sample_csv};
pub use upstream::MockUpstream;
