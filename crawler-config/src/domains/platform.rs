//! Per-platform network profiles: request headers and proxies

use crate::env::EnvSnapshot;
use crate::env_keys::{self, platform as keys};
use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_required_string, validate_url, Validatable};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::fmt;

/// Browser user agent shared by both platforms
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Replacement text for secrets in displayed configuration
pub const REDACTED: &str = "<redacted>";

/// Content platform the crawler talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Douyin,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Douyin, Platform::Tiktok];

    /// Prefix of this platform's environment variables
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Platform::Douyin => "DOUYIN",
            Platform::Tiktok => "TIKTOK",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Douyin => "douyin",
            Platform::Tiktok => "tiktok",
        }
    }

    fn default_accept_language(&self) -> &'static str {
        match self {
            Platform::Douyin => "zh-CN,zh;q=0.9",
            Platform::Tiktok => "en-US,en;q=0.9",
        }
    }

    fn default_referer(&self) -> &'static str {
        match self {
            Platform::Douyin => "https://www.douyin.com/",
            Platform::Tiktok => "https://www.tiktok.com/",
        }
    }

    fn key(&self, suffix: &str) -> String {
        env_keys::platform_key(self.env_prefix(), suffix)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Request headers sent to a platform
///
/// Serializes as an ordered map keyed by the HTTP header names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headers {
    #[serde(rename = "Accept-Language")]
    pub accept_language: String,

    #[serde(rename = "User-Agent")]
    pub user_agent: String,

    #[serde(rename = "Referer")]
    pub referer: String,

    #[serde(rename = "Cookie")]
    pub cookie: String,
}

impl Headers {
    /// Header names in the order they are emitted
    pub const NAMES: [&'static str; 4] = ["Accept-Language", "User-Agent", "Referer", "Cookie"];

    /// Built-in headers for a platform
    pub fn defaults_for(platform: Platform) -> Self {
        Self {
            accept_language: platform.default_accept_language().to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: platform.default_referer().to_string(),
            cookie: String::new(),
        }
    }

    /// `(name, value)` pairs in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Self::NAMES.into_iter().zip([
            self.accept_language.as_str(),
            self.user_agent.as_str(),
            self.referer.as_str(),
            self.cookie.as_str(),
        ])
    }

    /// Look up a header by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Convert to an [`HeaderMap`] for an HTTP client
    ///
    /// Headers with an empty value are left out.
    pub fn to_header_map(&self) -> ConfigResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(Self::NAMES.len());
        for (name, value) in self.iter().filter(|(_, v)| !v.is_empty()) {
            let value = HeaderValue::from_str(value).map_err(|e| ConfigError::HeaderError {
                header: name.to_string(),
                message: e.to_string(),
            })?;
            map.insert(HeaderName::from_static(lowercase_name(name)), value);
        }
        Ok(map)
    }
}

// HeaderName::from_static only accepts lowercase names
fn lowercase_name(name: &'static str) -> &'static str {
    match name {
        "Accept-Language" => "accept-language",
        "User-Agent" => "user-agent",
        "Referer" => "referer",
        _ => "cookie",
    }
}

/// Proxy URLs per scheme; `None` means no proxy for that scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Proxies {
    pub http: Option<String>,
    pub https: Option<String>,
}

impl Proxies {
    /// Proxy for a URL scheme (`"http"` or `"https"`)
    pub fn for_scheme(&self, scheme: &str) -> Option<&str> {
        if scheme.eq_ignore_ascii_case("http") {
            self.http.as_deref()
        } else if scheme.eq_ignore_ascii_case("https") {
            self.https.as_deref()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

/// Headers and proxies used for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    #[serde(skip)]
    pub platform: Platform,

    pub headers: Headers,

    pub proxies: Proxies,
}

impl NetworkProfile {
    /// Profile with built-in headers and no proxies
    pub fn defaults_for(platform: Platform) -> Self {
        Self {
            platform,
            headers: Headers::defaults_for(platform),
            proxies: Proxies::default(),
        }
    }

    /// Resolve a profile from `<PREFIX>_*` variables
    ///
    /// Every header falls back to its default when unset or empty, so this
    /// cannot fail.
    pub fn from_env(platform: Platform, env: &EnvSnapshot) -> Self {
        let defaults = Headers::defaults_for(platform);
        let headers = Headers {
            accept_language: env.string_or(
                &platform.key(keys::ACCEPT_LANGUAGE),
                &defaults.accept_language,
            ),
            user_agent: env.string_or(&platform.key(keys::USER_AGENT), &defaults.user_agent),
            referer: env.string_or(&platform.key(keys::REFERER), &defaults.referer),
            cookie: env.string_or(&platform.key(keys::COOKIE), &defaults.cookie),
        };
        let proxies = Proxies {
            http: env.optional(&platform.key(keys::HTTP_PROXY)),
            https: env.optional(&platform.key(keys::HTTPS_PROXY)),
        };

        Self {
            platform,
            headers,
            proxies,
        }
    }

    /// Copy with the cookie masked
    pub fn redacted(&self) -> Self {
        let mut profile = self.clone();
        if !profile.headers.cookie.is_empty() {
            profile.headers.cookie = REDACTED.to_string();
        }
        profile
    }

    /// Environment variables this profile reads, with their defaults
    pub fn env_defaults(platform: Platform) -> Vec<(String, String)> {
        let defaults = Headers::defaults_for(platform);
        vec![
            (platform.key(keys::ACCEPT_LANGUAGE), defaults.accept_language),
            (platform.key(keys::USER_AGENT), defaults.user_agent),
            (platform.key(keys::REFERER), defaults.referer),
            (platform.key(keys::COOKIE), defaults.cookie),
            (platform.key(keys::HTTP_PROXY), String::new()),
            (platform.key(keys::HTTPS_PROXY), String::new()),
        ]
    }
}

impl Validatable for NetworkProfile {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.headers.user_agent, "User-Agent", self.domain_name())?;
        validate_required_string(
            &self.headers.accept_language,
            "Accept-Language",
            self.domain_name(),
        )?;
        validate_required_string(&self.headers.referer, "Referer", self.domain_name())?;

        // Proxy strings are passed through as given; a bad URL only warns.
        for (scheme, proxy) in [("http", &self.proxies.http), ("https", &self.proxies.https)] {
            if let Some(url) = proxy {
                if let Err(e) = validate_url(url, scheme, self.domain_name()) {
                    log::warn!("{}", e);
                }
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        self.platform.name()
    }
}
