//! Configuration schema definitions.
//!
//! One config struct per service. All types derive Serde traits so they can be
//! overlaid from a TOML file before the environment is applied.

use serde::{Deserialize, Serialize};

/// Port both services listen on unless told otherwise.
pub const DEFAULT_PORT: u16 = 5050;

/// Static file served by the proxy when no upstream is configured.
pub const DEFAULT_UPSTREAM_URL: &str = "https://raw.githubusercontent.com/nirgeier/KubernetesLabs/master/Labs/10-Istio/demo-services/mock-data/external-mock1.txt";

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Simulated failure settings for the echo responder.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FailureConfig {
    /// Request path that may fail.
    pub path: String,

    /// One request in `one_in` (on average) gets a 500.
    pub one_in: u32,
}

impl Default for FailureConfig {
    fn default() -> Self {
        Self {
            path: "/failsometimes".to_string(),
            one_in: 3,
        }
    }
}

/// Root configuration for the echo responder (`web-server`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoConfig {
    pub listener: ListenerConfig,

    /// Text placed at the start of every reply.
    pub content: String,

    pub failure: FailureConfig,

    pub observability: ObservabilityConfig,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            content: "Hello world".to_string(),
            failure: FailureConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// How the proxy reports a failed upstream call to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureStatusMode {
    /// Always answer 200; the failure is only visible in the body.
    #[default]
    Ok,
    /// Answer 502 Bad Gateway with the same body.
    BadGateway,
}

impl std::str::FromStr for FailureStatusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" | "200" => Ok(Self::Ok),
            "bad-gateway" | "502" => Ok(Self::BadGateway),
            other => Err(format!("unknown upstream failure status mode: {}", other)),
        }
    }
}

/// Root configuration for the forwarding proxy (`proxy-server`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub listener: ListenerConfig,

    /// Base URL every inbound path is appended to.
    pub upstream_url: String,

    /// Deadline for the outbound call. `None` waits forever.
    pub upstream_timeout_secs: Option<u64>,

    pub upstream_failure_status: FailureStatusMode,

    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout_secs: None,
            upstream_failure_status: FailureStatusMode::Ok,
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
