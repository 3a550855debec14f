//! Health check endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check response body
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server state was created
    pub uptime: f64,
    pub environment: String,
}

/// Basic liveness check, used by load balancers and the batch client
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("OK"),
        timestamp: Utc::now(),
        uptime: state.uptime().as_secs_f64(),
        environment: state.config.server().environment.clone(),
    };

    Ok(HttpResponse::Ok().json(health_status))
}
