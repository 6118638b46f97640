//! Echo responder subsystem (`web-server`).
//!
//! # Data Flow
//! ```text
//! Inbound request (any method, any path)
//!     → failure.rs (pick 200 or, on the failure path, maybe 500)
//!     → handler.rs (render "<content> requested from <path> on <host> with code <status>")
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Stateless: nothing is shared between requests except read-only config
//! - Fresh random draw per request, never seeded
//! - Host name is looked up per request

pub mod failure;
pub mod handler;

pub use failure::FailurePolicy;
pub use handler::{echo_handler, render_reply, EchoState};
