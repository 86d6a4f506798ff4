//! Configuration module for Discussion-Scraper
//!
//! Tunables for pacing, retries and client identity. They default to the
//! values the scraper has always used and can be overridden from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use discussion_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Retries per request: {}", config.retry.max_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    FetchConfig, IdentityConfig, RetryConfig, ScraperConfig, DEFAULT_USER_AGENTS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config, resolve_config};
pub use validation::validate;
