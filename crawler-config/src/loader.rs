//! Configuration loading and environment variable handling

use crate::domains::api::ApiConfig;
use crate::domains::logging::LoggingConfig;
use crate::domains::platform::{NetworkProfile, Platform};
use crate::domains::CrawlerConfig;
use crate::env::{read_env_file, EnvSnapshot};
use crate::error::ConfigResult;
use std::path::{Path, PathBuf};

/// Name of the optional env file
pub const ENV_FILE_NAME: &str = ".env";

/// Default env file location, resolved from the working directory
///
/// Falls back to a relative `.env` when the working directory is unavailable.
pub fn default_env_file() -> PathBuf {
    std::env::current_dir()
        .map(|dir| find_env_file(&dir))
        .unwrap_or_else(|_| PathBuf::from(ENV_FILE_NAME))
}

/// Closest `.env` in `start` or one of its ancestors
///
/// Returns `start/.env` when no ancestor has one, so a later read reports the
/// file as missing.
pub fn find_env_file(start: &Path) -> PathBuf {
    start
        .ancestors()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| start.join(ENV_FILE_NAME))
}

/// Outcome of merging the env file into a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// The loader was built without an env file
    Disabled,
    /// No file at the given path
    Missing(PathBuf),
    /// File read; `added` variables were not already set by the process
    Merged { path: PathBuf, added: usize },
}

impl std::fmt::Display for EnvFileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvFileStatus::Disabled => write!(f, "env file disabled"),
            EnvFileStatus::Missing(path) => write!(f, "no env file at {}", path.display()),
            EnvFileStatus::Merged { path, added } => {
                write!(f, "merged {} variables from {}", added, path.display())
            }
        }
    }
}

/// Configuration loader with env file support
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Env file merged underneath the process environment
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader reading the default env file
    pub fn new() -> Self {
        Self {
            env_file: Some(default_env_file()),
        }
    }

    /// Create a loader reading a specific env file
    pub fn with_env_file(path: impl Into<PathBuf>) -> Self {
        Self {
            env_file: Some(path.into()),
        }
    }

    /// Create a loader that only looks at the process environment
    pub fn without_env_file() -> Self {
        Self { env_file: None }
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Capture the process environment with the env file merged underneath
    ///
    /// Variables already set in the process win over the file. The process
    /// environment itself is left untouched.
    pub fn snapshot(&self) -> ConfigResult<EnvSnapshot> {
        self.snapshot_with_status().map(|(env, _)| env)
    }

    /// Like [`ConfigLoader::snapshot`], also reporting what happened to the env file
    ///
    /// Callers that set up logging after the snapshot use the status to
    /// report the merge once their logger is ready.
    pub fn snapshot_with_status(&self) -> ConfigResult<(EnvSnapshot, EnvFileStatus)> {
        let env = EnvSnapshot::from_process();
        log::debug!("Captured {} process environment variables", env.len());
        self.merge_env_file(env)
    }

    /// Merge the configured env file underneath `env`
    pub fn merge_env_file(
        &self,
        mut env: EnvSnapshot,
    ) -> ConfigResult<(EnvSnapshot, EnvFileStatus)> {
        let status = match self.env_file {
            None => EnvFileStatus::Disabled,
            Some(ref path) => match read_env_file(path)? {
                Some(pairs) => EnvFileStatus::Merged {
                    path: path.clone(),
                    added: env.merge_defaults(pairs),
                },
                None => EnvFileStatus::Missing(path.clone()),
            },
        };
        log::debug!("{}", status);

        Ok((env, status))
    }

    /// Load configuration from the process environment and env file
    pub fn load(&self) -> ConfigResult<CrawlerConfig> {
        let env = self.snapshot()?;
        Self::from_snapshot(&env)
    }

    /// Build and validate configuration from a snapshot
    pub fn from_snapshot(env: &EnvSnapshot) -> ConfigResult<CrawlerConfig> {
        let config = CrawlerConfig {
            douyin: NetworkProfile::from_env(Platform::Douyin, env),
            tiktok: NetworkProfile::from_env(Platform::Tiktok, env),
            api: ApiConfig::from_env(env)?,
            logging: LoggingConfig::from_env(env)?,
        };

        config.validate_all()?;

        log::debug!(
            "Configuration loaded: api={} workers={} debug={} douyin_proxy={} tiktok_proxy={}",
            config.api.bind_address(),
            config.api.workers,
            config.api.debug,
            !config.douyin.proxies.is_empty(),
            !config.tiktok.proxies.is_empty(),
        );

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
