//! Upstream tracking client

use super::sanitize::sanitize_response;
use crate::config::UpstreamConfig;
use crate::core::rate_limiter::RateLimiter;
use crate::core::types::TraceResponse;
use crate::core::validator::{TrackingIdentifier, validate};
use crate::utils::error::{GatewayError, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};
use url::Url;

/// Query parameter carrying the identifier upstream
const IDENTIFIER_PARAM: &str = "b";

/// Single-request mediator in front of the upstream tracking API.
///
/// Stateless per call apart from the shared [`RateLimiter`]; safe to share
/// across handlers.
#[derive(Clone)]
pub struct TraceGateway {
    client: Client,
    config: UpstreamConfig,
    base_url: Url,
    limiter: Arc<RateLimiter>,
}

impl TraceGateway {
    /// Create a new gateway
    pub fn new(config: UpstreamConfig, limiter: Arc<RateLimiter>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::Config(format!("Invalid upstream URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            base_url,
            limiter,
        })
    }

    /// Upstream URL for an identifier, percent-encoded into the query
    pub fn build_url(&self, identifier: &TrackingIdentifier) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(IDENTIFIER_PARAM, identifier.as_str());
        url
    }

    /// Shared rate limiter
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Resolve one raw identifier on behalf of `client_key`.
    ///
    /// Admission is checked first; a rejected caller never reaches the
    /// identifier check or the upstream.
    pub async fn fetch_trace(&self, client_key: &str, raw: &str) -> Result<TraceResponse> {
        let admission = self.limiter.admit(client_key).await;
        if !admission.allowed {
            let retry_after_secs = admission.retry_after_secs.unwrap_or(1);
            warn!(
                client = client_key,
                retry_after_secs, "Rejected tracking request: rate limit exceeded"
            );
            return Err(GatewayError::RateLimited { retry_after_secs });
        }

        let identifier = validate(raw).map_err(|e| {
            warn!(client = client_key, "Rejected tracking request: {}", e);
            GatewayError::invalid_input(e.to_string())
        })?;

        self.fetch_identifier(&identifier).await
    }

    /// Query upstream for an already validated identifier, bounded by the
    /// configured timeout. Dropping the in-flight request on timeout means a
    /// late upstream answer is never observed.
    pub async fn fetch_identifier(&self, identifier: &TrackingIdentifier) -> Result<TraceResponse> {
        let url = self.build_url(identifier);
        let timeout = self.config.timeout();
        let started = Instant::now();

        debug!(identifier = %identifier, "Querying upstream");

        let result = match tokio::time::timeout(timeout, self.request(url)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::timeout(format!(
                "no upstream response within {}ms",
                timeout.as_millis()
            ))),
        };

        match &result {
            Ok(response) => debug!(
                identifier = %identifier,
                has_detail = response.detail.is_some(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Upstream lookup completed"
            ),
            Err(GatewayError::Internal(detail)) => {
                error!(identifier = %identifier, "Upstream lookup failed: {}", detail)
            }
            Err(e) => warn!(identifier = %identifier, "Upstream lookup failed: {}", e),
        }

        result
    }

    async fn request(&self, url: Url) -> Result<TraceResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            // Status and body stay server-side
            warn!(status = status.as_u16(), "Upstream returned non-success status");
            return Err(GatewayError::upstream());
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::internal(format!("malformed upstream body: {}", e)))?;

        Ok(sanitize_response(&value))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::timeout(format!("upstream request timed out: {}", e))
    } else {
        GatewayError::internal(format!("upstream request failed: {}", e))
    }
}
