//! cal — Console Audit Logs
//!
//! Fetches developer audit logs from the console, normalises them into
//! `developer,event,timestamp` rows and writes the CSV file a downstream
//! reporting script falls back to. This crate wires the layers together; the
//! layers themselves live in `cal-core` and `cal-console` and are re-exported
//! here so integration tests can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! authenticate ──► fetch ──► normalize ──► serialize ──► persist
//! └── cal-console ──┘        └────────── cal-core ──────────┘
//! ```
//!
//! A run is single-threaded and strictly sequential. The two console calls
//! are the only suspension points.

pub mod pipeline;

pub use cal_console::{ConsoleClient, ConsoleError, HttpConsoleClient, Session};
pub use cal_core::{config, export, normalizer};
pub use cal_core::{AuditEntry, Config, ConfigError, Credentials, CsvDocument, ResultShape};
pub use pipeline::{Outcome, Sink};
