use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crawler_config::cli::{ConfigCli, ConfigCliRunner};
use crawler_config::{ConfigLoader, CrawlerConfig, LogFormat, LoggingConfig};

fn main() -> Result<()> {
    let cli = ConfigCli::parse();

    if !cli.command.needs_config() {
        print!("{}", CrawlerConfig::generate_sample_env());
        return Ok(());
    }

    // Logging settings come from the same snapshot as the rest of the config
    // Tracing is not up yet, so the env file outcome is logged once it is
    let loader = cli.loader();
    let (env, env_file_status) = loader
        .snapshot_with_status()
        .context("Failed to read the environment")?;
    let logging = LoggingConfig::from_env(&env).context("Invalid logging configuration")?;
    init_tracing(&logging, cli.log_level.as_deref())?;

    debug!(variables = env.len(), env_file = %env_file_status, "Captured environment");
    let config = ConfigLoader::from_snapshot(&env).context("Failed to load configuration")?;
    info!(
        bind = %config.api_settings().bind_address(),
        workers = config.api_settings().workers,
        "Configuration loaded"
    );

    let output = ConfigCliRunner::run(&cli.command, &config)?;
    print!("{}", output);
    Ok(())
}

/// Initialize tracing on stderr, leaving stdout for command output
///
/// `--log-level` wins over `RUST_LOG`, which wins over `LOG_LEVEL`.
fn init_tracing(config: &LoggingConfig, log_level: Option<&str>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!(
                "Invalid log level '{}', falling back to '{}'",
                level, config.level
            );
            EnvFilter::new(config.level.as_str())
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str())),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
