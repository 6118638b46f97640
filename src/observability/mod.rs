//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (startup banner, per-request debug, upstream failures)
//!     → logging.rs (filter + formatter, stdout)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - No metrics endpoint; the mesh sidecar exports traffic metrics

pub mod logging;

pub use logging::init_logging;
