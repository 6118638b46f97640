//! Service-mesh demo services.
//!
//! Two leaf HTTP services used to show sidecar traffic routing:
//! an echo responder with optional failure injection, and a forwarding
//! proxy that relays each path to a fixed upstream and reports the latency.

pub mod config;
pub mod echo;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;

pub use config::{EchoConfig, ProxyConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
