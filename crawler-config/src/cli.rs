//! Command-line interface for inspecting configuration
//!
//! The binary loads one [`CrawlerConfig`] at startup and hands it to
//! [`ConfigCliRunner`]; nothing here reads the environment directly.

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::{ConfigLoader, ConfigResult, CrawlerConfig, Platform};

/// Crawler configuration tool
#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Inspect the Douyin/TikTok crawler configuration")]
#[command(version)]
pub struct ConfigCli {
    /// Env file merged underneath the process environment
    #[arg(long, global = true, conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not read any env file
    #[arg(long, global = true)]
    pub no_env_file: bool,

    /// Log level (overrides LOG_LEVEL and RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Available configuration commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the resolved configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Print cookies instead of masking them
        #[arg(long)]
        reveal_secrets: bool,
    },

    /// Load and validate the configuration
    Check,

    /// Print a .env template with every recognised variable
    SampleEnv,
}

/// Output format for `show`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl ConfigCli {
    /// Loader honouring `--env-file` / `--no-env-file`
    pub fn loader(&self) -> ConfigLoader {
        match (&self.env_file, self.no_env_file) {
            (_, true) => ConfigLoader::without_env_file(),
            (Some(path), false) => ConfigLoader::with_env_file(path.clone()),
            (None, false) => ConfigLoader::new(),
        }
    }
}

impl ConfigCommand {
    /// Whether the command needs a loaded configuration
    pub fn needs_config(&self) -> bool {
        !matches!(self, ConfigCommand::SampleEnv)
    }
}

/// CLI application runner
pub struct ConfigCliRunner;

impl ConfigCliRunner {
    /// Render the output of a command for an already loaded configuration
    pub fn run(command: &ConfigCommand, config: &CrawlerConfig) -> ConfigResult<String> {
        match command {
            ConfigCommand::Show {
                format,
                reveal_secrets,
            } => Self::show(config, *format, *reveal_secrets),
            ConfigCommand::Check => Ok(Self::check(config)),
            ConfigCommand::SampleEnv => Ok(CrawlerConfig::generate_sample_env()),
        }
    }

    fn show(
        config: &CrawlerConfig,
        format: OutputFormat,
        reveal_secrets: bool,
    ) -> ConfigResult<String> {
        let config = if reveal_secrets {
            config.clone()
        } else {
            config.redacted()
        };

        match format {
            OutputFormat::Yaml => config.to_yaml(),
            OutputFormat::Json => config.to_json(),
        }
    }

    fn check(config: &CrawlerConfig) -> String {
        let mut out = String::from("✅ Configuration OK\n");
        let api = config.api_settings();
        let _ = writeln!(
            out,
            "   api: {} (workers: {}, timeout: {}s, debug: {})",
            api.bind_address(),
            api.workers,
            api.timeout_secs(),
            api.debug
        );

        for platform in Platform::ALL {
            let profile = config.profile(platform);
            let cookie = if profile.headers.cookie.is_empty() {
                "not set"
            } else {
                "set"
            };
            let _ = writeln!(
                out,
                "   {}: cookie {}, http proxy: {}, https proxy: {}",
                platform,
                cookie,
                profile.proxies.http.as_deref().unwrap_or("none"),
                profile.proxies.https.as_deref().unwrap_or("none"),
            );
        }

        out
    }
}
