//! HTTP route modules
//!
//! All endpoints live under `/api`.

pub mod health;
pub mod trace;

use actix_web::web;

/// Register every route on the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(trace::configure_routes)
            .configure(health::configure_routes),
    );
}
