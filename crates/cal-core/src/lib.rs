//! cal-core — Console Audit Logs core library.
//!
//! This crate holds everything in the export pipeline that does not touch the
//! network: configuration, the canonical record type, the normalizer that
//! reconciles loosely-shaped console payloads, and the CSV exporter.
//!
//! # Architecture
//!
//! ```text
//! Fetcher (cal-console) ──► Normalizer ──► Exporter ──► file / stdout
//! ```
//!
//! A run is strictly sequential and owns all of its data; nothing here is
//! shared across tasks.

pub mod config;
pub mod error;
pub mod export;
pub mod normalizer;
pub mod types;

pub use config::{Config, Credentials};
pub use error::ConfigError;
pub use export::CsvDocument;
pub use types::{AuditEntry, ResultShape};
