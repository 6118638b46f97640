//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Issue the outbound GET for a proxied request
//! - Relay the upstream body whatever its status code
//! - Turn transport failures into readable text
//!
//! # Design Decisions
//! - The target is parsed as an `http::Uri`, so the path reaches the
//!   upstream byte for byte (no dot-segment removal, no percent decoding)
//! - No retries; a mesh sidecar is expected to provide them
//! - No deadline unless one is configured
//! - Idle connections are not kept, each request dials fresh

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Uri};
use http_body_util::BodyExt;
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

/// Errors from the outbound call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Bad target, connection, DNS or protocol failure. Carries the whole
    /// error chain flattened into one line.
    #[error("Error: {0}")]
    Request(String),

    /// No answer within the configured deadline.
    #[error("Error: upstream did not answer within {0} seconds")]
    Timeout(u64),
}

impl UpstreamError {
    fn request(err: &(dyn StdError + 'static)) -> Self {
        UpstreamError::Request(error_chain(err))
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Something that can fetch the body behind a URL.
pub trait Upstream: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// [`Upstream`] backed by the `hyper-util` legacy client, over plain HTTP
/// or TLS.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    timeout: Option<Duration>,
}

impl HttpUpstream {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        connector.enforce_http(false);
        let connector = HttpsConnector::new_with_connector(connector);

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .set_host(true)
            .build(connector);

        Self { client, timeout }
    }

    async fn get(&self, uri: Uri) -> Result<String, UpstreamError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri.clone())
            .body(Body::empty())
            .map_err(|e| UpstreamError::request(&e))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| UpstreamError::request(&e))?;

        tracing::debug!(
            uri = %uri,
            status = response.status().as_u16(),
            "Upstream responded"
        );

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| UpstreamError::request(&e))?
            .to_bytes();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Upstream for HttpUpstream {
    async fn fetch(&self, url: &str) -> Result<String, UpstreamError> {
        let uri: Uri = url.parse().map_err(|e| UpstreamError::request(&e))?;

        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.get(uri))
                .await
                .map_err(|_| UpstreamError::Timeout(timeout.as_secs()))?,
            None => self.get(uri).await,
        }
    }
}
