//! Where a batch gets its lookups from

use crate::core::gateway::TraceGateway;
use crate::core::types::TraceResponse;
use crate::core::validator::TrackingIdentifier;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client key used when a batch talks to an in-process gateway
pub const LOCAL_CLIENT_KEY: &str = "local";

/// Resolves one identifier. The batch processor calls this strictly one at
/// a time.
#[async_trait]
pub trait TraceSource: Send + Sync {
    async fn fetch(&self, identifier: &TrackingIdentifier) -> Result<TraceResponse>;
}

#[async_trait]
impl<T: TraceSource + ?Sized> TraceSource for Arc<T> {
    async fn fetch(&self, identifier: &TrackingIdentifier) -> Result<TraceResponse> {
        (**self).fetch(identifier).await
    }
}

#[async_trait]
impl TraceSource for TraceGateway {
    async fn fetch(&self, identifier: &TrackingIdentifier) -> Result<TraceResponse> {
        self.fetch_trace(LOCAL_CLIENT_KEY, identifier.as_str()).await
    }
}

/// HTTP client for the proxy's `GET /api/trace` endpoint
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ProxyClient {
    /// Default request budget; covers the proxy's own upstream timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client for the proxy at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(base_url)
            .and_then(|mut base| {
                // Keep any path prefix the proxy is mounted under
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join("api/trace")
            })
            .map_err(|e| GatewayError::Config(format!("Invalid proxy URL: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TraceSource for ProxyClient {
    async fn fetch(&self, identifier: &TrackingIdentifier) -> Result<TraceResponse> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("b", identifier.as_str());

        debug!(identifier = %identifier, "Querying proxy");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::timeout(format!("proxy request timed out: {}", e))
            } else {
                GatewayError::internal(format!("proxy request failed: {}", e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<TraceResponse>()
                .await
                .map_err(|e| GatewayError::internal(format!("malformed proxy response: {}", e)));
        }

        let retry_after_header = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        Err(match status {
            StatusCode::BAD_REQUEST => GatewayError::InvalidInput(message),
            StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited {
                retry_after_secs: retry_after_header
                    .or_else(|| body.get("retryAfter").and_then(|v| v.as_u64()))
                    .unwrap_or(1),
            },
            StatusCode::BAD_GATEWAY => GatewayError::Upstream(message),
            StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout(message),
            _ => GatewayError::Internal(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::validate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ProxyClient {
        ProxyClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let client = ProxyClient::new("http://localhost:3000", ProxyClient::DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:3000/api/trace");
        assert!(ProxyClient::new("not a url", ProxyClient::DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        for base in ["http://host:8080/btt", "http://host:8080/btt/"] {
            let client = ProxyClient::new(base, ProxyClient::DEFAULT_TIMEOUT).unwrap();
            assert_eq!(client.endpoint().as_str(), "http://host:8080/btt/api/trace");
        }
    }

    #[tokio::test]
    async fn test_prefixed_proxy_is_queried_under_its_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/btt/api/trace"))
            .and(query_param("b", "PKG001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": null})))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ProxyClient::new(&format!("{}/btt", server.uri()), Duration::from_secs(5)).unwrap();
        let response = client.fetch(&validate("PKG001").unwrap()).await.unwrap();
        assert!(response.detail.is_none());
    }

    #[tokio::test]
    async fn test_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trace"))
            .and(query_param("b", "PKG001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "detail": {"tanggal": "2024-01-01", "keterangan": "ok", "posisi": "Depok", "status": "DELIVERED"}
            })))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .await
            .fetch(&validate("PKG001").unwrap())
            .await
            .unwrap();
        assert_eq!(response.detail.unwrap().status, "DELIVERED");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (400, "INVALID"),
            (429, "RATE"),
            (502, "UPSTREAM"),
            (504, "TIMEOUT"),
            (500, "INTERNAL"),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/trace"))
                .respond_with(
                    ResponseTemplate::new(status)
                        .insert_header("retry-after", "17")
                        .set_body_json(json!({"error": "proxy said no"})),
                )
                .mount(&server)
                .await;

            let err = client_for(&server)
                .await
                .fetch(&validate("PKG001").unwrap())
                .await
                .unwrap_err();

            let matched = match (&err, expected) {
                (GatewayError::InvalidInput(m), "INVALID") => m == "proxy said no",
                (GatewayError::RateLimited { retry_after_secs }, "RATE") => *retry_after_secs == 17,
                (GatewayError::Upstream(_), "UPSTREAM") => true,
                (GatewayError::Timeout(_), "TIMEOUT") => true,
                (GatewayError::Internal(_), "INTERNAL") => true,
                _ => false,
            };
            assert!(matched, "status {status} mapped to {err:?}");
        }
    }

    #[tokio::test]
    async fn test_error_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch(&validate("PKG001").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Internal error: HTTP error! status: 503");
    }
}
