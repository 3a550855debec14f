//! Error handling for the tracking gateway
//!
//! This module defines the error taxonomy shared by the gateway, the proxy
//! endpoints and the batch client.

use actix_web::http::StatusCode;
use actix_web::http::header::RETRY_AFTER;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Generic message surfaced to callers for internal failures in production
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to fetch tracking data";

/// Generic message surfaced to callers for upstream failures
pub const UPSTREAM_ERROR_MESSAGE: &str = "Tracking service returned an error";

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed identifier; a client mistake that should not be retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Caller exceeded its quota for the current window
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Upstream did not answer within the timeout budget
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Upstream answered with a non-success status. The message is generic.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Unexpected failure (network error, malformed body, ...)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    /// Upstream failure with the generic message; the upstream status and
    /// body never reach the caller.
    pub fn upstream() -> Self {
        Self::Upstream(UPSTREAM_ERROR_MESSAGE.to_string())
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::InvalidInput(_) => "INVALID_INPUT",
            GatewayError::RateLimited { .. } => "RATE_LIMITED",
            GatewayError::Timeout(_) => "TIMEOUT",
            GatewayError::Upstream(_) => "UPSTREAM_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Build the HTTP response, including internal detail only when
    /// `expose_detail` is set (non-production environments).
    pub fn to_response(&self, expose_detail: bool) -> HttpResponse {
        let status = self.status_code();

        let mut body = serde_json::json!({
            "error": self.public_message(),
            "code": self.code(),
        });

        let mut builder = HttpResponse::build(status);

        match self {
            GatewayError::RateLimited { retry_after_secs } => {
                body["retryAfter"] = serde_json::json!(retry_after_secs);
                builder.insert_header((RETRY_AFTER, retry_after_secs.to_string()));
            }
            GatewayError::InvalidInput(_)
            | GatewayError::Timeout(_)
            | GatewayError::Upstream(_) => {}
            _ if expose_detail => {
                body["message"] = serde_json::json!(self.to_string());
            }
            _ => {}
        }

        builder.json(body)
    }

    fn public_message(&self) -> String {
        match self {
            GatewayError::InvalidInput(_) | GatewayError::RateLimited { .. } => self.to_string(),
            GatewayError::Timeout(_) => "Tracking service did not respond in time".to_string(),
            GatewayError::Upstream(_) => UPSTREAM_ERROR_MESSAGE.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response(false)
    }
}
