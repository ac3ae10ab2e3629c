//! Fake console API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `POST /console/home/login` — accepts one login/password pair and answers
//!   with an `auth-key` header
//! - `GET /console/application/{app_id}/audit/log` — the configured payload,
//!   only when the `auth-key` header matches
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeConsoleApi::start(serde_json::json!([])).await.unwrap();
//! let client = HttpConsoleClient::new(&api.base_url());
//! ```

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const FAKE_LOGIN: &str = "dev@studio.dev";
pub const FAKE_PASSWORD: &str = "correct horse";
pub const FAKE_AUTH_KEY: &str = "fake-auth-key-123";
pub const FAKE_USER_ID: &str = "0A1B2C3D";

/// State shared between the router and test code.
struct ApiState {
    payload: Value,
    /// Forced status for the audit-log route.
    logs_status: StatusCode,
    /// Send the key as `authKey` in the body instead of the header.
    key_in_body: bool,
    logins: usize,
    log_requests: Vec<String>,
}

/// Handle to the running fake console server.
pub struct FakeConsoleApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeConsoleApi {
    /// Start the fake console on a random port, serving `payload` from the
    /// audit-log route.
    pub async fn start(payload: Value) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            payload,
            logs_status: StatusCode::OK,
            key_in_body: false,
            logins: 0,
            log_requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/console/home/login", post(login))
            .route("/console/application/{app_id}/audit/log", get(audit_log))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make the audit-log route answer with `status` and an error body.
    pub async fn fail_logs_with(&self, status: StatusCode) {
        self.state.lock().await.logs_status = status;
    }

    /// Return the session key in the JSON body rather than the header.
    pub async fn key_in_body(&self) {
        self.state.lock().await.key_in_body = true;
    }

    /// Login attempts seen so far, successful or not.
    pub async fn logins(&self) -> usize {
        self.state.lock().await.logins
    }

    /// App ids requested from the audit-log route.
    pub async fn log_requests(&self) -> Vec<String> {
        self.state.lock().await.log_requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn login(State(state): State<Arc<Mutex<ApiState>>>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().await;
    state.logins += 1;

    let accepted = body.get("login").and_then(Value::as_str) == Some(FAKE_LOGIN)
        && body.get("password").and_then(Value::as_str) == Some(FAKE_PASSWORD);
    if !accepted {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": 3003, "message": "Invalid login or password" })),
        )
            .into_response();
    }

    if state.key_in_body {
        Json(json!({ "objectId": FAKE_USER_ID, "email": FAKE_LOGIN, "authKey": FAKE_AUTH_KEY }))
            .into_response()
    } else {
        (
            [("auth-key", FAKE_AUTH_KEY)],
            Json(json!({ "objectId": FAKE_USER_ID, "email": FAKE_LOGIN })),
        )
            .into_response()
    }
}

async fn audit_log(
    Path(app_id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> Response {
    let mut state = state.lock().await;
    state.log_requests.push(app_id);

    let authorised = headers.get("auth-key").and_then(|v| v.to_str().ok()) == Some(FAKE_AUTH_KEY);
    if !authorised {
        return (StatusCode::UNAUTHORIZED, "missing or stale auth-key").into_response();
    }
    if state.logs_status != StatusCode::OK {
        return (state.logs_status, "audit log service unavailable").into_response();
    }

    Json(state.payload.clone()).into_response()
}
