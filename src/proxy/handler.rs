//! Forwarding request handler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::config::{FailureStatusMode, ProxyConfig};
use crate::proxy::target::target_url;
use crate::proxy::upstream::{Upstream, UpstreamError};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// State shared by every proxied request. Read-only after startup.
#[derive(Debug)]
pub struct ProxyState<U> {
    pub base_url: Arc<str>,
    pub upstream: Arc<U>,
    pub failure_status: FailureStatusMode,
}

impl<U> Clone for ProxyState<U> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            upstream: self.upstream.clone(),
            failure_status: self.failure_status,
        }
    }
}

impl<U: Upstream> ProxyState<U> {
    pub fn new(config: &ProxyConfig, upstream: U) -> Self {
        Self {
            base_url: Arc::from(config.upstream_url.as_str()),
            upstream: Arc::new(upstream),
            failure_status: config.upstream_failure_status,
        }
    }
}

/// Build the reply body from the upstream outcome.
pub fn render_reply(outcome: &Result<String, UpstreamError>, elapsed: Duration) -> String {
    let text = match outcome {
        Ok(body) => body.clone(),
        Err(e) => e.to_string(),
    };
    format!(
        "Proxying reply: {} - Took {} milliseconds{}",
        text,
        elapsed.as_millis(),
        LINE_ENDING
    )
}

/// Relays the inbound path to the upstream and reports how long it took.
///
/// The inbound response is only written once the outbound call resolves.
pub async fn proxy_handler<U: Upstream>(State(state): State<ProxyState<U>>, uri: Uri) -> Response {
    let start = Instant::now();
    let target = target_url(&state.base_url, uri.path());

    let outcome = state.upstream.fetch(&target).await;
    let elapsed = start.elapsed();

    let status = match (&outcome, state.failure_status) {
        (Err(e), mode) => {
            tracing::warn!(
                target_url = %target,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "Upstream request failed"
            );
            match mode {
                FailureStatusMode::Ok => StatusCode::OK,
                FailureStatusMode::BadGateway => StatusCode::BAD_GATEWAY,
            }
        }
        (Ok(_), _) => {
            tracing::debug!(
                target_url = %target,
                elapsed_ms = elapsed.as_millis() as u64,
                "Proxied request"
            );
            StatusCode::OK
        }
    };

    (status, render_reply(&outcome, elapsed)).into_response()
}
