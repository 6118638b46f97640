//! Configuration validation.
//!
//! Serde handles syntax; these checks cover value ranges and URL shape.
//! All errors are collected, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::{EchoConfig, ListenerConfig, ProxyConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener port must be non-zero")]
    ZeroPort,

    #[error("upstream url {url:?} is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("failure path {0:?} must start with '/'")]
    FailurePath(String),

    #[error("failure ratio one_in must be greater than zero")]
    FailureRatio,
}

pub fn validate_echo(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_listener(&config.listener, &mut errors);
    if !config.failure.path.starts_with('/') {
        errors.push(ValidationError::FailurePath(config.failure.path.clone()));
    }
    if config.failure.one_in == 0 {
        errors.push(ValidationError::FailureRatio);
    }
    finish(errors)
}

pub fn validate_proxy(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_listener(&config.listener, &mut errors);
    if let Err(reason) = check_upstream(&config.upstream_url) {
        errors.push(ValidationError::UpstreamUrl {
            url: config.upstream_url.clone(),
            reason,
        });
    }
    finish(errors)
}

fn check_listener(listener: &ListenerConfig, errors: &mut Vec<ValidationError>) {
    if listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
}

fn check_upstream(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {}", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
