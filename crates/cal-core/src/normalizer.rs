//! Normalizer — reconciles raw console payloads into [`AuditEntry`] values.
//!
//! Two stages:
//!
//! 1. [`coerce_records`] finds the record array inside the response. The
//!    console has returned a bare array, `{ "data": [...] }` and
//!    `{ "logs": [...] }`; the first that matches wins, anything else is zero
//!    records.
//! 2. [`normalize_record`] maps each record onto the canonical triple with one
//!    resolver per field. Each resolver walks a fixed list of source keys and
//!    takes the first present value, falling back to a constant.
//!
//! A value is present when it is non-null and non-empty. Strings must be
//! non-empty strings; timestamps must be non-zero numbers or numeric strings.
//! Any other JSON type falls through to the next source key.

use crate::types::{AuditEntry, ResultShape};
use serde_json::Value;

/// Placeholder for a missing developer or event.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// Response shape coercion
// ---------------------------------------------------------------------------

/// Locate the record array in a raw console response.
///
/// Returns the detected shape with the records it contains. An
/// [`ResultShape::Unrecognized`] result always carries an empty slice.
pub fn coerce_records(raw: &Value) -> (ResultShape, &[Value]) {
    if let Value::Array(records) = raw {
        return (ResultShape::Bare, records);
    }
    if let Some(Value::Array(records)) = raw.get("data") {
        return (ResultShape::Data, records);
    }
    if let Some(Value::Array(records)) = raw.get("logs") {
        return (ResultShape::Logs, records);
    }
    (ResultShape::Unrecognized, &[])
}

/// [`coerce_records`], logging a warning with the raw payload when the shape is
/// not recognised.
pub fn extract_records(raw: &Value) -> &[Value] {
    let (shape, records) = coerce_records(raw);
    match shape {
        ResultShape::Unrecognized => {
            tracing::warn!(raw = %raw, "unexpected audit log format, treating as zero records");
        }
        _ => {
            tracing::debug!(%shape, count = records.len(), "located audit log records");
        }
    }
    records
}

/// Normalise every record in a raw console response, preserving fetch order.
pub fn normalize(raw: &Value) -> Vec<AuditEntry> {
    extract_records(raw).iter().map(normalize_record).collect()
}

// ---------------------------------------------------------------------------
// Per-record resolvers
// ---------------------------------------------------------------------------

/// Map one raw record onto the canonical triple.
pub fn normalize_record(record: &Value) -> AuditEntry {
    AuditEntry {
        developer: resolve_developer(record),
        event: resolve_event(record),
        timestamp: resolve_timestamp(record),
    }
}

/// `created`, then `timestamp`, then `0`.
pub fn resolve_timestamp(record: &Value) -> i64 {
    ["created", "timestamp"]
        .iter()
        .find_map(|key| record.get(key).and_then(as_millis))
        .unwrap_or(0)
}

/// `action`, then `event`, then `"Unknown"`, with every comma replaced by a
/// space.
pub fn resolve_event(record: &Value) -> String {
    let event = ["action", "event"]
        .iter()
        .find_map(|key| record.get(key).and_then(as_text))
        .unwrap_or(UNKNOWN);
    event.replace(',', " ")
}

/// `developer` as a string, then `developer.email`, then `user_email`, then
/// `email`, then `"Unknown"`.
///
/// No escaping happens here. A developer value containing a comma shifts the
/// CSV columns; the consumer of the file expects exactly this format.
pub fn resolve_developer(record: &Value) -> String {
    let developer = record.get("developer");
    developer
        .and_then(as_text)
        .or_else(|| developer.and_then(|d| d.get("email")).and_then(as_text))
        .or_else(|| record.get("user_email").and_then(as_text))
        .or_else(|| record.get("email").and_then(as_text))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn as_text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn as_millis(value: &Value) -> Option<i64> {
    let millis = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (millis != 0).then_some(millis)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
