//! Tracking lookup endpoint

use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{error, warn};

/// Client key used when the peer address is unavailable
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Configure tracking routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/trace", web::get().to(trace));
}

#[derive(Debug, Default, Deserialize)]
struct TraceQuery {
    b: Option<String>,
}

/// Rate-limit key for a request: the peer IP, or the first
/// `X-Forwarded-For` hop when the proxy sits behind a trusted balancer.
pub fn client_key(req: &HttpRequest, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// `GET /api/trace?b=<identifier>`
async fn trace(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    // A missing or undecodable `b` is treated as empty so it fails validation
    // after rate limiting, like any other bad identifier.
    let query = web::Query::<TraceQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();
    let raw = query.b.unwrap_or_default();

    let key = client_key(&req, state.config.server().trust_forwarded_for);

    match state.gateway.fetch_trace(&key, &raw).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            match &e {
                GatewayError::InvalidInput(_) | GatewayError::RateLimited { .. } => {
                    warn!(client = %key, "Trace request rejected: {}", e)
                }
                _ => error!(client = %key, "Trace request failed: {}", e),
            }
            e.to_response(state.expose_error_detail())
        }
    }
}
