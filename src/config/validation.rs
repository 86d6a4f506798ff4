use crate::config::types::{FetchConfig, IdentityConfig, RetryConfig, ScraperConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Validates the entire configuration
pub fn validate(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_retry_config(&config.retry)?;
    validate_identity_config(&config.identity)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if let Some(language) = &config.accept_language {
        validate_header_value("accept-language", language)?;
    }

    Ok(())
}

/// Validates retry configuration
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.backoff_max_ms < config.backoff_base_ms {
        return Err(ConfigError::Validation(format!(
            "backoff-max-ms ({}) must be >= backoff-base-ms ({})",
            config.backoff_max_ms, config.backoff_base_ms
        )));
    }

    if let Some(status) = config.statuses.iter().find(|s| !(400..=599).contains(*s)) {
        return Err(ConfigError::Validation(format!(
            "retry status {} is not an HTTP error status",
            status
        )));
    }

    Ok(())
}

/// Validates identity configuration
fn validate_identity_config(config: &IdentityConfig) -> Result<(), ConfigError> {
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "at least one user agent is required".to_string(),
        ));
    }

    for agent in &config.user_agents {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user agent cannot be empty".to_string(),
            ));
        }
        validate_header_value("user-agents", agent)?;
    }

    Ok(())
}

fn validate_header_value(key: &str, value: &str) -> Result<(), ConfigError> {
    HeaderValue::from_str(value).map(|_| ()).map_err(|_| {
        ConfigError::Validation(format!("{} contains an invalid header value: '{}'", key, value))
    })
}
