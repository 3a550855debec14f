//! Tracking result types shared by the gateway, batch processor and exporter

use crate::core::validator::TrackingIdentifier;
use serde::{Deserialize, Serialize};

/// Placeholder rendered for missing detail fields
pub const MISSING_FIELD: &str = "-";

/// Sanitized tracking detail as exposed by the proxy.
///
/// Field names on the wire follow the upstream contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDetail {
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "keterangan")]
    pub description: String,
    #[serde(rename = "posisi")]
    pub position: String,
    pub status: String,
}

impl Default for TraceDetail {
    fn default() -> Self {
        Self {
            date: MISSING_FIELD.to_string(),
            description: MISSING_FIELD.to_string(),
            position: MISSING_FIELD.to_string(),
            status: MISSING_FIELD.to_string(),
        }
    }
}

/// Proxy response body: `{ "detail": { ... } | null }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResponse {
    pub detail: Option<TraceDetail>,
}

/// Terminal outcome of one identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    Error(String),
}

/// Coarse status bucket used when rendering results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Delivered,
    OnProcess,
    Unknown,
    Error,
}

/// Result of resolving one identifier in a batch run. Built once and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceResult {
    /// 1-based position among the valid identifiers of the run
    pub sequence_number: usize,
    pub identifier: TrackingIdentifier,
    pub date: String,
    pub description: String,
    pub position: String,
    pub status: String,
    pub outcome: Outcome,
}

impl TraceResult {
    /// Successful lookup; a missing detail renders every field as `-`
    pub fn success(
        sequence_number: usize,
        identifier: TrackingIdentifier,
        detail: Option<TraceDetail>,
    ) -> Self {
        let detail = detail.unwrap_or_default();
        Self {
            sequence_number,
            identifier,
            date: detail.date,
            description: detail.description,
            position: detail.position,
            status: detail.status,
            outcome: Outcome::Ok,
        }
    }

    /// Failed lookup
    pub fn failure(
        sequence_number: usize,
        identifier: TrackingIdentifier,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            identifier,
            date: MISSING_FIELD.to_string(),
            description: MISSING_FIELD.to_string(),
            position: MISSING_FIELD.to_string(),
            status: MISSING_FIELD.to_string(),
            outcome: Outcome::Error(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Ok => None,
            Outcome::Error(message) => Some(message),
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match &self.outcome {
            Outcome::Error(_) => StatusClass::Error,
            Outcome::Ok if self.status.eq_ignore_ascii_case("delivered") => {
                StatusClass::Delivered
            }
            Outcome::Ok if self.status != MISSING_FIELD => StatusClass::OnProcess,
            Outcome::Ok => StatusClass::Unknown,
        }
    }
}
