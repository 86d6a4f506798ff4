use serde::Deserialize;
use std::time::Duration;

/// Browser identities rotated across requests
pub const DEFAULT_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:132.0) Gecko/20100101 Firefox/132.0",
];

/// Main configuration structure for Discussion-Scraper
///
/// Every section and key is optional in the TOML file; missing values fall
/// back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub fetch: FetchConfig,
    pub retry: RetryConfig,
    pub identity: IdentityConfig,
}

/// Request pacing and per-request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base delay slept before every fetch (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Upper bound of the random extra delay for listing pages (milliseconds)
    #[serde(rename = "listing-jitter-ms")]
    pub listing_jitter_ms: u64,

    /// Upper bound of the random extra delay for discussion pages (milliseconds)
    #[serde(rename = "detail-jitter-ms")]
    pub detail_jitter_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Accept-Language header sent with discussion page requests
    #[serde(rename = "accept-language")]
    pub accept_language: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            listing_jitter_ms: 150,
            detail_jitter_ms: 250,
            timeout_secs: 20,
            accept_language: Some("en-US,en;q=0.9".to_string()),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry-on-status configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on every further retry (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,

    /// Cap on a single backoff delay (milliseconds)
    #[serde(rename = "backoff-max-ms")]
    pub backoff_max_ms: u64,

    /// HTTP status codes that are retried
    pub statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 1000,
            backoff_max_ms: 30_000,
            statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

/// Client identity configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// User-Agent strings, one picked at random per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

impl IdentityConfig {
    /// The identity the crawl policy is evaluated for
    pub fn primary(&self) -> &str {
        self.user_agents
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }
}
