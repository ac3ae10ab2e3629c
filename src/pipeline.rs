//! Pipeline — one fetch-and-export run.
//!
//! [`fetch`] validates the configuration and talks to the console;
//! [`export`] turns whatever came back into a CSV document and persists it.
//! [`run`] chains the two. Nothing is written unless fetching succeeded and
//! the normalised record set is non-empty.

use anyhow::Context;
use cal_console::ConsoleClient;
use cal_core::config::{Config, ConsoleConfig};
use cal_core::{export, normalizer};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a finished document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Replace the file at this path.
    File(PathBuf),
    /// Write to the run's output stream (stdout for the binary).
    Stdout,
}

/// How a completed run ended. Every variant is a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written { path: PathBuf, rows: usize },
    Printed { rows: usize },
    /// No records; nothing was written.
    Empty,
}

/// Authenticate and load the raw audit-log payload.
///
/// Credentials and the application id are checked before the client is
/// touched, so a misconfigured run never reaches the network.
pub async fn fetch<C: ConsoleClient>(client: &C, console: &ConsoleConfig) -> anyhow::Result<Value> {
    let credentials = console.credentials()?;
    let app_id = console.app_id()?;

    let session = cal_console::authenticate(client, &credentials).await?;
    let raw = cal_console::fetch_audit_logs(client, &session, app_id).await?;
    Ok(raw)
}

/// Read a previously captured console response from disk.
pub fn read_raw(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading console response from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} does not contain JSON", path.display()))
}

/// Normalise `raw`, render it, and hand it to `sink`. `out` receives the
/// document for [`Sink::Stdout`].
pub fn export<W: Write>(raw: &Value, sink: &Sink, out: &mut W) -> anyhow::Result<Outcome> {
    let entries = normalizer::normalize(raw);
    tracing::info!(count = entries.len(), "fetched audit log entries");

    let Some(doc) = export::to_csv(&entries) else {
        tracing::info!("no logs found, nothing to write");
        return Ok(Outcome::Empty);
    };

    if let Some((first, last)) = export::time_span(&entries) {
        tracing::info!(
            from = %first.to_rfc3339(),
            to = %last.to_rfc3339(),
            "export covers"
        );
    }

    match sink {
        Sink::File(path) => {
            export::write_document(&doc, path)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(rows = doc.rows(), path = %path.display(), "saved audit logs");
            Ok(Outcome::Written {
                path: path.clone(),
                rows: doc.rows(),
            })
        }
        Sink::Stdout => {
            out.write_all(doc.as_str().as_bytes())?;
            out.flush()?;
            Ok(Outcome::Printed { rows: doc.rows() })
        }
    }
}

/// Full run against the console: [`fetch`] then [`export`].
pub async fn run<C: ConsoleClient, W: Write>(
    client: &C,
    config: &Config,
    sink: &Sink,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    let raw = fetch(client, &config.console).await?;
    export(&raw, sink, out)
}
