//! Mocked upstream tracking API

use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the upstream serves lookups on
pub const TRACE_PATH: &str = "/api/tracelastonly/";

/// Wiremock server answering like the tracking provider
pub struct MockUpstream {
    pub server: MockServer,
}

impl MockUpstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put in `UpstreamConfig::base_url`
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), TRACE_PATH)
    }

    /// Upstream body for a known shipment
    pub fn detail(status: &str) -> Value {
        json!({
            "detail": {
                "tanggal": "2024-03-01 08:15",
                "keterangan": "Shipment processed",
                "posisi": "Jakarta Hub",
                "status": status
            }
        })
    }

    /// Answer `identifier` with a JSON body
    pub async fn respond(&self, identifier: &str, status_code: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(TRACE_PATH))
            .and(query_param("b", identifier))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every lookup with the same JSON body
    pub async fn respond_to_all(&self, status_code: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(TRACE_PATH))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `identifier` only after `delay`
    pub async fn respond_slowly(&self, identifier: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(TRACE_PATH))
            .and(query_param("b", identifier))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Self::detail("LATE"))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of requests the upstream has seen
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}
