//! Test builders — ergonomic constructors for raw console records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use cal::AuditEntry;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw audit-log records as the console returns them.
///
/// # Example
///
/// ```rust,ignore
/// let record = RawRecordBuilder::new()
///     .created(1000)
///     .action("Login")
///     .developer_email("bob@x.com")
///     .build();
/// ```
#[derive(Default)]
pub struct RawRecordBuilder {
    fields: Map<String, Value>,
}

impl RawRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn created(self, millis: i64) -> Self {
        self.field("created", millis)
    }

    pub fn timestamp(self, millis: i64) -> Self {
        self.field("timestamp", millis)
    }

    pub fn action(self, action: &str) -> Self {
        self.field("action", action)
    }

    pub fn event(self, event: &str) -> Self {
        self.field("event", event)
    }

    pub fn developer(self, developer: &str) -> Self {
        self.field("developer", developer)
    }

    /// `developer` as a nested object carrying an `email`.
    pub fn developer_email(self, email: &str) -> Self {
        self.field("developer", serde_json::json!({ "email": email }))
    }

    pub fn user_email(self, email: &str) -> Self {
        self.field("user_email", email)
    }

    pub fn email(self, email: &str) -> Self {
        self.field("email", email)
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Expected canonical entry.
pub fn entry(developer: &str, event: &str, timestamp: i64) -> AuditEntry {
    AuditEntry {
        developer: developer.to_string(),
        event: event.to_string(),
        timestamp,
    }
}

/// `n` login records from rotating developers, one second apart.
pub fn build_records(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                RawRecordBuilder::new()
                    .created(1_700_000_000_000 + i as i64 * 1000)
                    .action(&format!("Action {i}"))
                    .developer(&format!("dev{}@studio.dev", i % 3))
                    .build()
            })
            .collect(),
    )
}
