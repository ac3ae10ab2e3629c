//! Configuration types for cal.
//!
//! [`Config::load`] layers the built-in defaults, an optional TOML file and the
//! `BACKENDLESS_*` environment variables, in that order. The value is built
//! once at process start and handed to the fetcher and exporter explicitly.
//! [`Config::from_sources`] does the same against an arbitrary variable lookup
//! so tests never touch process state.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[console]
host = "https://develop.backendless.com"

[export]
output_path = "console_audit_logs.csv"
"#;

/// Console host URL.
pub const ENV_HOST: &str = "BACKENDLESS_API_URL";
/// Developer login identifier.
pub const ENV_LOGIN: &str = "BACKENDLESS_DEV_LOGIN";
/// Developer password.
pub const ENV_PASSWORD: &str = "BACKENDLESS_DEV_PASSWORD";
/// Target application id.
pub const ENV_APP_ID: &str = "BACKENDLESS_APP_ID";

/// Environment variable → config key.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    (ENV_HOST, "console.host"),
    (ENV_LOGIN, "console.login"),
    (ENV_PASSWORD, "console.password"),
    (ENV_APP_ID, "console.app_id"),
];

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[console]` section.
///
/// Credentials and the application id stay optional here; they are only
/// required once a run actually needs to talk to the console, and
/// [`ConsoleConfig::credentials`] / [`ConsoleConfig::app_id`] enforce that.
#[derive(Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
}

fn default_host() -> String { "https://develop.backendless.com".to_string() }

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            login: None,
            password: None,
            app_id: None,
        }
    }
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("app_id", &self.app_id)
            .finish()
    }
}

impl ConsoleConfig {
    /// Validated login/password pair. Fails on the first missing or empty
    /// value without doing any I/O.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let login = non_empty(self.login.as_deref()).ok_or(ConfigError::Missing {
            key: "console.login",
            env: ENV_LOGIN,
        })?;
        let password = non_empty(self.password.as_deref()).ok_or(ConfigError::Missing {
            key: "console.password",
            env: ENV_PASSWORD,
        })?;
        Ok(Credentials {
            login: login.to_string(),
            password: password.to_string(),
        })
    }

    pub fn app_id(&self) -> Result<&str, ConfigError> {
        non_empty(self.app_id.as_deref()).ok_or(ConfigError::Missing {
            key: "console.app_id",
            env: ENV_APP_ID,
        })
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_output_path() -> PathBuf { PathBuf::from("console_audit_logs.csv") }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

/// A developer login and password, both known to be non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        ConsoleConfig {
            login: Some(login.into()),
            password: Some(password.into()),
            ..ConsoleConfig::default()
        }
        .credentials()
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the defaults, the optional file at `path`, and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::from_sources(path, |key| std::env::var(key).ok())
    }

    /// Load from the defaults, the optional file at `path`, and whatever
    /// `lookup` returns for each `BACKENDLESS_*` variable. Empty values count
    /// as unset.
    pub fn from_sources<F>(path: Option<&Path>, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        for (env, key) in ENV_OVERRIDES {
            let value = lookup(env).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem or the
    /// environment.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
