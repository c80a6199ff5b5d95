//! API server configuration

use crate::env::EnvSnapshot;
use crate::env_keys::api as keys;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_port_range, validate_required_string, warn_if_zero, Validatable};
use serde::Serialize;
use std::net::SocketAddr;
use std::time::Duration;

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Debug mode
    pub debug: bool,

    /// Number of worker processes
    pub workers: u32,

    /// Request timeout
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            workers: default_workers(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Resolve from `API_*` variables
    ///
    /// A numeric variable that is set but does not parse is an error naming
    /// the variable. An empty numeric variable counts as set. The integer
    /// fields are unsigned, so negative values are rejected at parse time.
    pub fn from_env(env: &EnvSnapshot) -> ConfigResult<Self> {
        let defaults = Self::default();
        let timeout_secs: u64 = env.parse_or(keys::TIMEOUT, defaults.timeout.as_secs())?;

        Ok(Self {
            host: env.string_or(keys::HOST, &defaults.host),
            port: env.parse_or(keys::PORT, defaults.port)?,
            debug: env.flag(keys::DEBUG),
            workers: env.parse_or(keys::WORKERS, defaults.workers)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `host:port`
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Parse the bind address into a socket address
    ///
    /// Fails for host names; only IP literals are accepted.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let address = self.bind_address();
        address.parse().map_err(|e| {
            ConfigError::env(
                keys::HOST,
                format!("'{}' is not a socket address: {}", address, e),
            )
        })
    }

    /// Timeout in whole seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }

    /// Environment variables read by [`ApiConfig::from_env`], with their defaults
    pub fn env_defaults() -> Vec<(String, String)> {
        let defaults = Self::default();
        vec![
            (keys::HOST.to_string(), defaults.host),
            (keys::PORT.to_string(), defaults.port.to_string()),
            (keys::DEBUG.to_string(), "False".to_string()),
            (keys::WORKERS.to_string(), defaults.workers.to_string()),
            (keys::TIMEOUT.to_string(), defaults.timeout.as_secs().to_string()),
        ]
    }
}

impl Validatable for ApiConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.host, "host", self.domain_name())?;
        validate_port_range(self.port, "port", self.domain_name())?;
        warn_if_zero(u64::from(self.workers), "workers", self.domain_name())?;
        warn_if_zero(self.timeout.as_secs(), "timeout", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "api"
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> u32 {
    1
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
