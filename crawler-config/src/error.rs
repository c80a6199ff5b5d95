//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading the env file
    #[error("Failed to read env file: {0}")]
    FileReadError(#[from] std::io::Error),

    /// Malformed line or substitution in the env file
    #[error("Failed to parse env file: {0}")]
    EnvFileError(#[from] dotenvy::Error),

    /// A recognised environment variable holds a value that cannot be converted
    #[error("Invalid {variable}: {message}")]
    EnvError { variable: String, message: String },

    /// Domain-specific configuration error
    #[error("Domain configuration error in {domain}: {message}")]
    DomainError { domain: String, message: String },

    /// Header value that cannot be sent on the wire
    #[error("Invalid header {header}: {message}")]
    HeaderError { header: String, message: String },

    /// YAML serialization error
    #[error("Failed to render config as YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("Failed to render config as JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ConfigError {
    /// Build an error for an environment variable that failed conversion
    pub fn env(variable: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::EnvError {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Name of the offending environment variable, if the error is tied to one
    pub fn variable(&self) -> Option<&str> {
        match self {
            ConfigError::EnvError { variable, .. } => Some(variable),
            _ => None,
        }
    }
}
