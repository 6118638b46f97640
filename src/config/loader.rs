//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::{EchoConfig, ListenerConfig, ObservabilityConfig, ProxyConfig};
use crate::config::validation::{validate_echo, validate_proxy, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A service configuration that can be layered: defaults, then an optional
/// TOML file, then environment variables.
pub trait ServiceConfig: DeserializeOwned + Default {
    /// Apply environment overrides using `lookup` to read variables.
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>;

    /// Semantic checks run after all layers are applied.
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

/// Load, overlay and validate a configuration against the real environment.
pub fn load_config<C: ServiceConfig>(path: Option<&Path>) -> Result<C, ConfigError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] but with an explicit variable lookup.
pub fn load_config_with<C, F>(path: Option<&Path>, lookup: F) -> Result<C, ConfigError>
where
    C: ServiceConfig,
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => C::default(),
    };
    config.apply_env(lookup)?;
    config.validate().map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse a TOML file into a configuration. Missing fields take defaults.
pub fn load_file<C: DeserializeOwned>(path: &Path) -> Result<C, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

impl ServiceConfig for EchoConfig {
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        apply_listener_env(&mut self.listener, &lookup)?;
        apply_observability_env(&mut self.observability, &lookup)?;
        if let Some(content) = lookup("SERVER_NAME") {
            self.content = content;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_echo(self)
    }
}

impl ServiceConfig for ProxyConfig {
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        apply_listener_env(&mut self.listener, &lookup)?;
        apply_observability_env(&mut self.observability, &lookup)?;
        if let Some(url) = lookup("PROXY_URL_TO_SERVE") {
            self.upstream_url = url;
        }
        if let Some(value) = lookup("PROXY_TIMEOUT_SECS") {
            let secs = value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "PROXY_TIMEOUT_SECS",
                value: value.clone(),
            })?;
            self.upstream_timeout_secs = Some(secs);
        }
        if let Some(value) = lookup("PROXY_UPSTREAM_FAILURE_STATUS") {
            self.upstream_failure_status = value.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PROXY_UPSTREAM_FAILURE_STATUS",
                value: value.clone(),
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_proxy(self)
    }
}

fn apply_listener_env<F>(listener: &mut ListenerConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // The demo manifests set a lowercase `port`.
    let (name, value) = match (lookup("port"), lookup("PORT")) {
        (Some(v), _) => ("port", v),
        (None, Some(v)) => ("PORT", v),
        (None, None) => return Ok(()),
    };
    listener.port = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar { name, value: value.clone() })?;
    Ok(())
}

fn apply_observability_env<F>(
    observability: &mut ObservabilityConfig,
    lookup: &F,
) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup("LOG_LEVEL") {
        observability.log_level = level;
    }
    if let Some(format) = lookup("LOG_FORMAT") {
        observability.json = match format.trim().to_ascii_lowercase().as_str() {
            "json" => true,
            "text" | "pretty" => false,
            _ => {
                return Err(ConfigError::InvalidVar {
                    name: "LOG_FORMAT",
                    value: format,
                })
            }
        };
    }
    Ok(())
}
