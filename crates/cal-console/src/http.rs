//! HTTPS implementation of [`ConsoleClient`].
//!
//! Endpoints:
//! - `POST {host}/console/home/login` with `{"login": .., "password": ..}`.
//!   The session key comes back in the `auth-key` header, or as `authKey` in
//!   the body on older consoles.
//! - `GET {host}/console/application/{app_id}/audit/log` with the `auth-key`
//!   header set.

use crate::{ConsoleClient, ConsoleError, Session};
use cal_core::Credentials;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const AUTH_KEY_HEADER: &str = "auth-key";

/// Longest response body quoted in an error message.
const MAX_BODY_IN_ERROR: usize = 512;

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(rename = "authKey")]
    auth_key: Option<String>,
    #[serde(rename = "objectId")]
    object_id: Option<String>,
}

/// A [`ConsoleClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpConsoleClient {
    http: reqwest::Client,
    host: String,
}

impl HttpConsoleClient {
    /// Client for `host`. A trailing `/` is ignored.
    pub fn new(host: &str) -> Self {
        Self::with_client(reqwest::Client::new(), host)
    }

    pub fn with_client(http: reqwest::Client, host: &str) -> Self {
        Self {
            http,
            host: host.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}

impl ConsoleClient for HttpConsoleClient {
    fn host(&self) -> &str {
        &self.host
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, ConsoleError> {
        let auth_err = |reason: String| ConsoleError::Auth {
            host: self.host.clone(),
            login: credentials.login().to_string(),
            reason,
        };

        let url = self.url("/console/home/login");
        tracing::debug!(%url, "POST login");
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                login: credentials.login(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(|e| auth_err(describe(&e)))?;

        let status = response.status();
        let header_key = response
            .headers()
            .get(AUTH_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| auth_err(describe(&e)))?;

        if !status.is_success() {
            return Err(auth_err(format!("HTTP {status}: {}", clip(&body))));
        }

        let parsed: LoginResponse = serde_json::from_str(&body).unwrap_or_default();
        let auth_key = header_key
            .or(parsed.auth_key)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| auth_err("login response carried no auth key".to_string()))?;

        Ok(Session::new(auth_key, parsed.object_id))
    }

    async fn load_audit_logs(
        &self,
        session: &Session,
        app_id: &str,
    ) -> Result<Value, ConsoleError> {
        let fetch_err = |reason: String| ConsoleError::Fetch {
            host: self.host.clone(),
            app_id: app_id.to_string(),
            reason,
        };

        let url = self.url(&format!("/console/application/{app_id}/audit/log"));
        tracing::debug!(%url, "GET audit logs");
        let response = self
            .http
            .get(&url)
            .header(AUTH_KEY_HEADER, session.auth_key())
            .send()
            .await
            .map_err(|e| fetch_err(describe(&e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| fetch_err(describe(&e)))?;
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {status}: {}", clip(&body))));
        }

        serde_json::from_str(&body).map_err(|e| fetch_err(format!("response is not JSON: {e}")))
    }
}

/// Flatten an error and its sources into one line.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn clip(body: &str) -> &str {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
