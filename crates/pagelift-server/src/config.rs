// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration
//!
//! Everything the service needs at runtime is read from the process
//! environment once at startup and injected into the state from there;
//! nothing consults the environment afterwards.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration errors abort startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {name}")]
    MissingVar { name: &'static str },

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Pre-issued credential forwarded to the hosting provider
    pub github_token: String,

    /// Hosting provider API base URL
    pub api_url: String,

    /// Readiness polling after repository creation
    pub readiness: ReadinessConfig,
}

impl ServerConfig {
    /// Build configuration from the process environment.
    ///
    /// `GITHUB_TOKEN` is required; `PORT` (default 8000) and
    /// `GITHUB_API_URL` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let github_token = get("GITHUB_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingVar {
                name: "GITHUB_TOKEN",
            })?;

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let api_url =
            get("GITHUB_API_URL").unwrap_or_else(|| pagelift_github::DEFAULT_API_URL.to_string());

        Ok(Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            github_token,
            api_url,
            readiness: ReadinessConfig::default(),
        })
    }
}

/// Bounded polling for a freshly created repository to become visible.
///
/// Attempt `n` sleeps `retry_delay * n` before the lookup, so the defaults
/// wait at most 500ms + 1s + ... + 2.5s before giving up and proceeding.
#[derive(Debug, Clone)]
pub struct ReadinessConfig {
    /// Maximum number of lookup attempts
    pub max_attempts: usize,

    /// Base delay between attempts
    pub retry_delay: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn config_from(pairs: &[(&'static str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars = vars(pairs);
        ServerConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn token_is_required() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar { name: "GITHUB_TOKEN" }));

        let err = config_from(&[("GITHUB_TOKEN", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar { name: "GITHUB_TOKEN" }));
    }

    #[test]
    fn port_defaults_to_8000() {
        let config = config_from(&[("GITHUB_TOKEN", "tok")]).unwrap();
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(config.api_url, pagelift_github::DEFAULT_API_URL);
    }

    #[test]
    fn port_override_is_honored() {
        let config = config_from(&[("GITHUB_TOKEN", "tok"), ("PORT", "9123")]).unwrap();
        assert_eq!(config.bind_addr.port(), 9123);
    }

    #[test]
    fn unparseable_port_fails_startup() {
        let err = config_from(&[("GITHUB_TOKEN", "tok"), ("PORT", "eight")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));
    }

    #[test]
    fn api_base_can_be_pointed_elsewhere() {
        let config = config_from(&[
            ("GITHUB_TOKEN", "tok"),
            ("GITHUB_API_URL", "http://127.0.0.1:4000"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:4000");
    }
}
