//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → listener.rs (bind host:port, fatal on failure)
//!     → address.rs (address for the startup banner)
//!     → Hand off to HTTP layer
//!
//! Per request
//!     → hostname.rs (local host name for echo replies)
//! ```

pub mod address;
pub mod hostname;
pub mod listener;

pub use address::advertised_ip;
pub use listener::{bind, ListenerError};
