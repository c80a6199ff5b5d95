//! Environment variable names recognised by the loader
//!
//! Platform keys are built from a prefix (`DOUYIN`, `TIKTOK`) and one of the
//! suffixes below, e.g. `DOUYIN_COOKIE`.

/// Per-platform key suffixes
pub mod platform {
    pub const ACCEPT_LANGUAGE: &str = "ACCEPT_LANGUAGE";
    pub const USER_AGENT: &str = "USER_AGENT";
    pub const REFERER: &str = "REFERER";
    pub const COOKIE: &str = "COOKIE";
    pub const HTTP_PROXY: &str = "HTTP_PROXY";
    pub const HTTPS_PROXY: &str = "HTTPS_PROXY";

    /// Every suffix, in the order they appear in a generated env file
    pub const ALL: &[&str] = &[
        ACCEPT_LANGUAGE,
        USER_AGENT,
        REFERER,
        COOKIE,
        HTTP_PROXY,
        HTTPS_PROXY,
    ];
}

/// API server
pub mod api {
    pub const HOST: &str = "API_HOST";
    pub const PORT: &str = "API_PORT";
    pub const DEBUG: &str = "API_DEBUG";
    pub const WORKERS: &str = "API_WORKERS";
    pub const TIMEOUT: &str = "API_TIMEOUT";
}

/// Logging
pub mod logging {
    pub const LEVEL: &str = "LOG_LEVEL";
    pub const FORMAT: &str = "LOG_FORMAT";
}

/// Full variable name for a platform prefix and suffix
pub fn platform_key(prefix: &str, suffix: &str) -> String {
    format!("{}_{}", prefix, suffix)
}
