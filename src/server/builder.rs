//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        config.validate()?;
        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the proxy with the given configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!(
        environment = %config.server().environment,
        upstream = %config.upstream().base_url,
        "Starting BTT tracking proxy"
    );

    let server = ServerBuilder::new().with_config(config).build().await?;
    let address = server.config().address();

    info!("Server starting at: http://{}", address);
    info!("API Endpoints:");
    info!("   GET  /api/trace?b=<identifier> - Tracking lookup");
    info!("   GET  /api/health - Health check");

    server.start().await
}
