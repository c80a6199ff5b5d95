//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Warn about a numeric setting of zero
///
/// Zero workers or a zero timeout is unusual but left to the consumer to
/// interpret, so it is never fatal.
pub fn warn_if_zero(value: u64, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value == 0 {
        log::warn!("{}.{} is 0", domain, field_name);
    }
    Ok(())
}

/// Validate a URL
pub fn validate_url(url: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if url.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }

    url::Url::parse(url).map_err(|e| ConfigError::DomainError {
        domain: domain.to_string(),
        message: format!("{} has invalid URL format: {}", field_name, e),
    })?;

    Ok(())
}

/// Warn about a port in the reserved range
///
/// Port 0 lets the OS pick a free port, so it is accepted as well.
pub fn validate_port_range(port: u16, field_name: &str, domain: &str) -> ConfigResult<()> {
    if (1..=1023).contains(&port) {
        log::warn!(
            "{}.{} port {} is in the reserved range (1-1023)",
            domain,
            field_name,
            port
        );
    }

    Ok(())
}
