//! Error types for cal-core.

use thiserror::Error;

/// Configuration problems detected before any network or file I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required setting `{key}` is missing (set {env} or `{key}` in the config file)")]
    Missing {
        key: &'static str,
        env: &'static str,
    },
}
