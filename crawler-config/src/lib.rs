//! Environment-driven configuration for the Douyin/TikTok crawler
//!
//! Reads request headers, proxies and API server settings from the process
//! environment, with an optional `.env` file supplying values the process
//! does not set. The result is an immutable [`CrawlerConfig`] built once at
//! startup and passed to whoever needs it.

pub mod env;
pub mod env_keys;
pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types
pub use env::EnvSnapshot;
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, EnvFileStatus};

// Re-export domain configurations
pub use domains::{
    api::ApiConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    platform::{Headers, NetworkProfile, Platform, Proxies},
    CrawlerConfig,
};
