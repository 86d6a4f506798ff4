use crate::config::types::ScraperConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ScraperConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use discussion_scraper::config::load_config;
///
/// let config = load_config(Path::new("scraper.toml")).unwrap();
/// println!("Base delay: {}ms", config.fetch.delay_ms);
/// ```
pub fn load_config(path: &Path) -> Result<ScraperConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<ScraperConfig, ConfigError> {
    let config: ScraperConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Resolves the effective configuration for a run
///
/// Uses the file at `path` when one is given, the built-in defaults
/// otherwise. Defaults are validated too so a bad override applied later is
/// caught by the same rules.
pub fn resolve_config(path: Option<&Path>) -> Result<ScraperConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = ScraperConfig::default();
            validate(&config)?;
            Ok(config)
        }
    }
}
