//! Domain-specific configuration modules

pub mod api;
pub mod logging;
pub mod platform;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use platform::{Headers, NetworkProfile, Platform, Proxies};
use serde::Serialize;

/// Complete crawler configuration combining all domains
///
/// Built once at startup by [`crate::ConfigLoader`] and handed to consumers
/// by reference. Nothing in it changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerConfig {
    /// Douyin request settings
    pub douyin: NetworkProfile,

    /// TikTok request settings
    pub tiktok: NetworkProfile,

    /// API server settings
    pub api: api::ApiConfig,

    /// Logging settings
    pub logging: logging::LoggingConfig,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            douyin: NetworkProfile::defaults_for(Platform::Douyin),
            tiktok: NetworkProfile::defaults_for(Platform::Tiktok),
            api: api::ApiConfig::default(),
            logging: logging::LoggingConfig::default(),
        }
    }
}

impl CrawlerConfig {
    pub fn douyin_headers(&self) -> &Headers {
        &self.douyin.headers
    }

    pub fn douyin_proxies(&self) -> &Proxies {
        &self.douyin.proxies
    }

    pub fn tiktok_headers(&self) -> &Headers {
        &self.tiktok.headers
    }

    pub fn tiktok_proxies(&self) -> &Proxies {
        &self.tiktok.proxies
    }

    pub fn api_settings(&self) -> &api::ApiConfig {
        &self.api
    }

    pub fn logging(&self) -> &logging::LoggingConfig {
        &self.logging
    }

    /// Network profile for a platform
    pub fn profile(&self, platform: Platform) -> &NetworkProfile {
        match platform {
            Platform::Douyin => &self.douyin,
            Platform::Tiktok => &self.tiktok,
        }
    }

    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.douyin.validate()?;
        self.tiktok.validate()?;
        self.api.validate()?;
        Ok(())
    }

    /// Copy safe to print: cookies are masked
    pub fn redacted(&self) -> Self {
        Self {
            douyin: self.douyin.redacted(),
            tiktok: self.tiktok.redacted(),
            ..self.clone()
        }
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate a sample `.env` file listing every recognised variable
    ///
    /// Variables whose default is empty or null are written commented out.
    pub fn generate_sample_env() -> String {
        let mut out = String::new();
        let mut section = |title: &str, entries: Vec<(String, String)>| {
            out.push_str(&format!("# {}\n", title));
            for (key, value) in entries {
                if value.is_empty() {
                    out.push_str(&format!("# {}=\n", key));
                } else if value.contains([' ', ';', '#']) {
                    out.push_str(&format!("{}=\"{}\"\n", key, value));
                } else {
                    out.push_str(&format!("{}={}\n", key, value));
                }
            }
            out.push('\n');
        };

        section("Douyin", NetworkProfile::env_defaults(Platform::Douyin));
        section("TikTok", NetworkProfile::env_defaults(Platform::Tiktok));
        section("API server", api::ApiConfig::env_defaults());
        section("Logging", logging::LoggingConfig::env_defaults());
        out
    }
}
