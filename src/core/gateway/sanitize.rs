//! Upstream response sanitization
//!
//! The upstream body is untrusted. Only the four display fields of the
//! nested `detail` object survive, each coerced to a bounded string.

use crate::core::types::{MISSING_FIELD, TraceDetail, TraceResponse};
use crate::utils::truncate_chars;
use serde_json::{Map, Value};

pub const MAX_DATE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_POSITION_LEN: usize = 200;
pub const MAX_STATUS_LEN: usize = 50;

/// Extract and sanitize the `detail` object of an upstream body.
///
/// A missing or non-object `detail` yields `detail: None`.
pub fn sanitize_response(body: &Value) -> TraceResponse {
    let detail = body
        .get("detail")
        .and_then(Value::as_object)
        .map(sanitize_detail);

    TraceResponse { detail }
}

fn sanitize_detail(detail: &Map<String, Value>) -> TraceDetail {
    TraceDetail {
        date: coerce_field(detail.get("tanggal"), MAX_DATE_LEN),
        description: coerce_field(detail.get("keterangan"), MAX_DESCRIPTION_LEN),
        position: coerce_field(detail.get("posisi"), MAX_POSITION_LEN),
        status: coerce_field(detail.get("status"), MAX_STATUS_LEN),
    }
}

fn coerce_field(value: Option<&Value>, max_chars: usize) -> String {
    let text = match value {
        None | Some(Value::Null) => return MISSING_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    if text.is_empty() {
        MISSING_FIELD.to_string()
    } else {
        truncate_chars(&text, max_chars)
    }
}
