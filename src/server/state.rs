//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::gateway::TraceGateway;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so cloning per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Proxy configuration (shared read-only)
    pub config: Arc<Config>,
    /// Upstream gateway, including its rate limiter
    pub gateway: Arc<TraceGateway>,
    /// Process start, for the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, gateway: TraceGateway) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            started_at: Instant::now(),
        }
    }

    /// Get proxy configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether error responses may carry internal detail
    pub fn expose_error_detail(&self) -> bool {
        !self.config.server().is_production()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
