//! # btt-trace
//!
//! Batch resolution of shipment tracking codes ("BTT") against a single
//! upstream tracking API.
//!
//! ## Features
//!
//! - **Tracking proxy**: `GET /api/trace?b=<identifier>` with per-client rate
//!   limiting, identifier validation, bounded upstream calls and sanitized
//!   responses
//! - **Batch client**: CSV-like input resolved one identifier at a time with
//!   pacing, progress reporting and cancellation
//! - **CSV export**: results rendered back to CSV in input order
//!
//! ## Proxy Mode
//!
//! ```rust,no_run
//! use btt_trace::{Config, TraceProxy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/trace-proxy.yaml").await?;
//!     let proxy = TraceProxy::new(config).await?;
//!     proxy.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Batch Mode
//!
//! ```rust,no_run
//! use btt_trace::core::batch::{BatchProcessor, NoopProgress, ProxyClient};
//! use btt_trace::core::export::to_csv;
//! use btt_trace::config::BatchConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProxyClient::new("http://localhost:3000", ProxyClient::DEFAULT_TIMEOUT)?;
//!     let mut processor = BatchProcessor::new(Arc::new(client), BatchConfig::default());
//!     let outcome = processor.run("NO,BTT\nBTT001\nBTT002", &NoopProgress).await?;
//!     println!("{}", to_csv(&outcome.results));
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::batch::{BatchError, BatchOutcome, BatchProcessor, ProxyClient, TraceSource};
pub use core::export::to_csv;
pub use core::gateway::TraceGateway;
pub use core::rate_limiter::{RateLimitResult, RateLimiter};
pub use core::types::{TraceDetail, TraceResponse, TraceResult};
pub use core::validator::{InvalidIdentifier, TrackingIdentifier, validate};

use tracing::info;

/// The tracking proxy: configuration plus a ready-to-start HTTP server
pub struct TraceProxy {
    config: Config,
    server: server::server::HttpServer,
}

impl TraceProxy {
    /// Create a new proxy instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new tracking proxy instance");

        let server = server::builder::ServerBuilder::new()
            .with_config(config.clone())
            .build()
            .await?;

        Ok(Self { config, server })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the proxy until the HTTP server stops
    pub async fn run(self) -> Result<()> {
        info!("Starting BTT tracking proxy");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "btt-trace");
        assert!(!DESCRIPTION.is_empty());
    }

    #[tokio::test]
    async fn test_trace_proxy_new() {
        let proxy = TraceProxy::new(Config::default()).await.unwrap();
        assert_eq!(proxy.config().server().port, 3000);
    }
}
