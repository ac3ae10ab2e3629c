//! cal-console — the console side of an export run.
//!
//! [`ConsoleClient`] is the collaborator contract the pipeline depends on: log
//! in once, then load the audit logs for one application. The shape of what
//! comes back is not fixed, so it is handed on as raw JSON for the normalizer
//! in `cal-core` to interpret.
//!
//! [`HttpConsoleClient`] talks to the real console over HTTPS. Tests swap in
//! their own implementations.

pub mod http;

pub use http::HttpConsoleClient;

use cal_core::Credentials;
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

/// Failures talking to the console. Every variant is fatal to a run.
///
/// Messages name the host, login and application id but never the password.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("login as {login} at {host} failed: {reason}")]
    Auth {
        host: String,
        login: String,
        reason: String,
    },

    #[error("loading audit logs for app {app_id} from {host} failed: {reason}")]
    Fetch {
        host: String,
        app_id: String,
        reason: String,
    },
}

/// An authenticated console session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    auth_key: String,
    user_id: Option<String>,
}

impl Session {
    pub fn new(auth_key: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            user_id,
        }
    }

    /// Value for the `auth-key` request header.
    pub fn auth_key(&self) -> &str {
        &self.auth_key
    }

    /// The logged-in developer's `objectId`, when the console reported one.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("auth_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Login and audit-log retrieval against one console host.
pub trait ConsoleClient {
    /// Base URL of the console this client talks to.
    fn host(&self) -> &str;

    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session, ConsoleError>> + Send;

    /// Load the raw audit-log payload for `app_id`.
    fn load_audit_logs(
        &self,
        session: &Session,
        app_id: &str,
    ) -> impl Future<Output = Result<Value, ConsoleError>> + Send;
}

/// Establish a session, logging the outcome.
pub async fn authenticate<C: ConsoleClient>(
    client: &C,
    credentials: &Credentials,
) -> Result<Session, ConsoleError> {
    tracing::info!(host = client.host(), "connecting to console host");
    tracing::info!(login = credentials.login(), "logging in");
    let session = client.login(credentials).await?;
    tracing::info!(user_id = session.user_id().unwrap_or("unknown"), "login successful");
    Ok(session)
}

/// Retrieve the raw audit-log payload for `app_id`.
pub async fn fetch_audit_logs<C: ConsoleClient>(
    client: &C,
    session: &Session,
    app_id: &str,
) -> Result<Value, ConsoleError> {
    tracing::info!(app_id, "fetching audit logs");
    client.load_audit_logs(session, app_id).await
}
