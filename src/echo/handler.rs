//! Echo request handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::config::EchoConfig;
use crate::echo::failure::FailurePolicy;
use crate::net::hostname::local_hostname;

/// State shared by every echo request. Read-only after startup.
#[derive(Debug, Clone)]
pub struct EchoState {
    pub content: Arc<str>,
    pub policy: Arc<FailurePolicy>,
}

impl EchoState {
    pub fn new(config: &EchoConfig) -> Self {
        Self {
            content: Arc::from(config.content.as_str()),
            policy: Arc::new(FailurePolicy::new(&config.failure)),
        }
    }
}

/// Build the reply body.
pub fn render_reply(content: &str, path: &str, hostname: &str, status: StatusCode) -> String {
    format!(
        "{} requested from {} on {} with code {}",
        content,
        path,
        hostname,
        status.as_u16()
    )
}

/// Answers every request with the configured content, the requested path
/// and the local host name.
pub async fn echo_handler(State(state): State<EchoState>, uri: Uri) -> Response {
    let path = uri.path();
    let status = state.policy.status_for(path, &mut rand::thread_rng());
    let hostname = local_hostname();

    tracing::debug!(
        path = %path,
        status = status.as_u16(),
        "Echo reply"
    );

    (status, render_reply(&state.content, path, &hostname, status)).into_response()
}
