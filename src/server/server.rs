//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::core::gateway::TraceGateway;
use crate::core::rate_limiter::RateLimiter;
use crate::server::handlers::not_found;
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
    /// Periodic eviction of expired rate windows
    cleanup_task: Option<JoinHandle<()>>,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let limiter = Arc::new(RateLimiter::new(config.rate_limit().clone()));
        let cleanup_task = limiter
            .is_enabled()
            .then(|| limiter.clone().start_cleanup_task());

        let gateway = TraceGateway::new(config.upstream().clone(), limiter)?;
        let state = AppState::new(config.clone(), gateway);

        Ok(Self {
            config: config.server().clone(),
            state,
            cleanup_task,
        })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "BTT-Trace")))
            .configure(routes::configure_routes)
            .default_service(web::route().to(not_found))
    }

    /// Start the HTTP server
    pub async fn start(mut self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state.clone());

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let result = server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)));

        if let Some(task) = self.cleanup_task.take() {
            task.abort();
        }

        result?;
        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(e: std::io::Error, bind_addr: &str, port: u16) -> GatewayError {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            warn!("Port {} is already in use", port);
            GatewayError::server(format!(
                "Failed to bind {}: port {} is already in use",
                bind_addr, port
            ))
        } else {
            GatewayError::server(format!("Failed to bind {}: {}", bind_addr, e))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        if let Some(task) = self.cleanup_task.take() {
            task.abort();
        }
    }
}
