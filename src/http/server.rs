//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router for either service
//! - Route every method and path to the service's single handler
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown

use axum::{
    http::HeaderName,
    routing::any,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{EchoConfig, ProxyConfig};
use crate::echo::{echo_handler, EchoState};
use crate::http::request::{request_span, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::ShutdownListener;
use crate::proxy::{proxy_handler, HttpUpstream, ProxyState, Upstream};

/// HTTP server for one of the demo services.
pub struct HttpServer {
    router: Router,
    name: &'static str,
}

impl HttpServer {
    /// Echo responder.
    pub fn echo(config: &EchoConfig) -> Self {
        let state = EchoState::new(config);
        let router = Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .with_state(state);

        Self {
            router: Self::with_layers(router),
            name: "web-server",
        }
    }

    /// Forwarding proxy using the `hyper-util` upstream client.
    pub fn proxy(config: &ProxyConfig) -> Self {
        let upstream = HttpUpstream::new(config.upstream_timeout_secs.map(Duration::from_secs));
        Self::proxy_with(config, upstream)
    }

    /// Forwarding proxy with a caller-supplied upstream.
    pub fn proxy_with<U: Upstream>(config: &ProxyConfig, upstream: U) -> Self {
        let state = ProxyState::new(config, upstream);
        let router = Router::new()
            .route("/", any(proxy_handler::<U>))
            .route("/{*path}", any(proxy_handler::<U>))
            .with_state(state);

        Self {
            router: Self::with_layers(router),
            name: "proxy-server",
        }
    }

    fn with_layers(router: Router) -> Router {
        let header = HeaderName::from_static(X_REQUEST_ID);
        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
                .layer(PropagateRequestIdLayer::new(header)),
        )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// In-flight requests are allowed to complete before this returns.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = self.name,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!(service = self.name, "HTTP server stopped");
        Ok(())
    }
}
