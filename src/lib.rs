//! Discussion-Scraper: keyword-filtered discussion harvesting
//!
//! This crate crawls a paginated discussion listing, keeps the links whose
//! text matches a keyword, fetches every matching discussion page and turns
//! it into a structured [`extract::Record`]. The records are sorted and
//! written out as a single JSON document.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod robots;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Discussion-Scraper operations
///
/// Only the variants listed here can end a run. Failures of individual
/// listing or discussion pages are logged and dropped by the crawler.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl policy disallows scraping {url}")]
    PolicyDenied { url: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Discussion-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use crawler::{run_pipeline, CrawlJob, RunOutcome};
pub use extract::{extract_record, Record};
