//! Fallback HTTP handlers

use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use tracing::debug;

/// Catch-all for unknown routes
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!("No route for {} {}", req.method(), req.path());

    HttpResponse::NotFound().json(json!({
        "error": "Not Found",
        "path": req.path(),
    }))
}
