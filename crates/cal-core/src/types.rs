//! Core types for cal-core.
//!
//! This module defines the canonical [`AuditEntry`] produced by the normalizer
//! and the [`ResultShape`] discriminant describing which container layout a
//! raw console response used.

/// A normalised audit-log record, ready for CSV export.
///
/// Built by [`crate::normalizer::normalize_record`]. The `event` text never
/// contains a comma; `developer` is copied through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEntry {
    /// Developer identity: a login, an email, or `"Unknown"`.
    pub developer: String,
    /// Free-text description of the action taken.
    pub event: String,
    /// Epoch milliseconds, `0` when the record carried no time.
    pub timestamp: i64,
}

impl AuditEntry {
    /// The entry's time as a UTC datetime, or `None` for the `0` placeholder
    /// and for values outside chrono's range.
    pub fn time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        if self.timestamp == 0 {
            return None;
        }
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.developer, self.event, self.timestamp)
    }
}

/// Which container layout a raw console response used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// The response is the record array itself.
    Bare,
    /// `{ "data": [...] }`
    Data,
    /// `{ "logs": [...] }`
    Logs,
    /// Anything else. Treated as zero records.
    Unrecognized,
}

impl std::fmt::Display for ResultShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultShape::Bare => write!(f, "bare array"),
            ResultShape::Data => write!(f, "data array"),
            ResultShape::Logs => write!(f, "logs array"),
            ResultShape::Unrecognized => write!(f, "unrecognized"),
        }
    }
}
