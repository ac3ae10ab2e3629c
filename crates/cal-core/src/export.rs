//! Exporter — serialises [`AuditEntry`] values into the fallback CSV format.
//!
//! The format is minimal: comma-separated, no quoting, rows joined
//! with `\n`, no trailing newline, header `developer,event,timestamp`. The
//! downstream reporting script parses exactly this, so it is not a general CSV
//! writer.

use crate::types::AuditEntry;
use std::path::Path;

/// First line of every document.
pub const CSV_HEADER: &str = "developer,event,timestamp";

/// A rendered CSV document. Always holds the header plus at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    text: String,
    rows: usize,
}

impl CsvDocument {
    /// The exact bytes to persist.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of data rows, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

/// Render entries in the order given. Returns `None` for an empty slice: an
/// empty export produces no document at all rather than a header-only file.
pub fn to_csv(entries: &[AuditEntry]) -> Option<CsvDocument> {
    if entries.is_empty() {
        return None;
    }

    let lines: Vec<String> = std::iter::once(CSV_HEADER.to_string())
        .chain(entries.iter().map(ToString::to_string))
        .collect();

    Some(CsvDocument {
        text: lines.join("\n"),
        rows: entries.len(),
    })
}

/// Write `doc` to `path`, replacing any previous contents. Parent directories
/// are created as needed.
pub fn write_document(doc: &CsvDocument, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.as_str())
}

/// Earliest and latest real timestamps among `entries`. Placeholder `0`
/// timestamps are ignored.
pub fn time_span(
    entries: &[AuditEntry],
) -> Option<(chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>)> {
    let mut times = entries.iter().filter_map(AuditEntry::time);
    let first = times.next()?;
    Some(times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
