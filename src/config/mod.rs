//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs, --config)
//!     → environment variables (loader.rs)
//!     → validation.rs (semantic checks)
//!     → EchoConfig / ProxyConfig (validated, immutable)
//!     → moved into the handler state at startup
//! ```
//!
//! # Design Decisions
//! - The environment is read once, at startup; handlers never read it
//! - All fields have defaults so an empty environment is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError, ServiceConfig};
pub use schema::{
    EchoConfig, FailureConfig, FailureStatusMode, ListenerConfig, ObservabilityConfig,
    ProxyConfig,
};
