//! Forwarding proxy subsystem (`proxy-server`).
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → target.rs (base URL + path, or base URL for "/")
//!     → upstream.rs (GET, await body or error)
//!     → handler.rs ("Proxying reply: <body-or-error> - Took <N> milliseconds")
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - One outbound call per inbound request, awaited before replying
//! - Upstream failures are reported in the body, status stays 200 unless
//!   configured otherwise
//! - Query strings are not forwarded

pub mod handler;
pub mod target;
pub mod upstream;

pub use handler::{proxy_handler, render_reply, ProxyState, LINE_ENDING};
pub use target::target_url;
pub use upstream::{HttpUpstream, Upstream, UpstreamError};
