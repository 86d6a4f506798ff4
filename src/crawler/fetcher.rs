//! HTTP fetcher implementation
//!
//! This module wraps a bare [`Transport`] with everything a single page
//! fetch needs:
//! - A pacing delay plus random jitter before the request
//! - A randomly chosen client identity per call
//! - Retry with capped exponential backoff on transient statuses
//! - Error classification

use crate::config::{ScraperConfig, DEFAULT_USER_AGENTS};
use crate::crawler::retry::RetryPolicy;
use crate::crawler::transport::{PageRequest, Transport};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch produced no page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Retryable status still returned after the whole retry budget
    #[error("HTTP {status} from {url} after {attempts} attempts")]
    TransientExhausted {
        url: String,
        status: u16,
        attempts: u32,
    },

    /// Non-retryable, non-success status
    #[error("HTTP {status} from {url}")]
    ClientError { url: String, status: u16 },

    /// Connection-level failure (never retried)
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::TransientExhausted { status, .. } | FetchError::ClientError { status, .. } => {
                Some(*status)
            }
            FetchError::Network { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::ClientError { status: 404, .. })
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Delay slept before every fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub delay: Duration,
    /// Upper bound of the uniformly random extra delay
    pub jitter: Duration,
}

impl Pacing {
    pub fn new(delay: Duration, jitter: Duration) -> Self {
        Self { delay, jitter }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draws the delay for one request
    pub fn sample(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            fastrand::u64(0..=jitter_ms)
        };
        self.delay + Duration::from_millis(extra)
    }
}

/// Rate-limited, retrying GET
///
/// Cheap to clone: the transport and identity pool are shared.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    pacing: Pacing,
    timeout: Duration,
    identities: Arc<[String]>,
    accept_language: Option<String>,
}

impl Fetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        retry: RetryPolicy,
        timeout: Duration,
        identities: Vec<String>,
    ) -> Self {
        Self {
            transport,
            retry,
            pacing: Pacing::none(),
            timeout,
            identities: identities.into(),
            accept_language: None,
        }
    }

    /// Builds a fetcher from the run configuration, without pacing
    pub fn from_config(transport: Arc<dyn Transport>, config: &ScraperConfig) -> Self {
        Self::new(
            transport,
            RetryPolicy::from_config(&config.retry),
            config.fetch.timeout(),
            config.identity.user_agents.clone(),
        )
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_accept_language(mut self, language: Option<String>) -> Self {
        self.accept_language = language;
        self
    }

    /// Picks the identity for one call
    pub fn pick_identity(&self) -> &str {
        if self.identities.is_empty() {
            return DEFAULT_USER_AGENTS[0];
        }
        &self.identities[fastrand::usize(..self.identities.len())]
    }

    /// Fetches a URL with pacing and retry
    ///
    /// # Request Flow
    ///
    /// 1. Sleep the pacing delay plus jitter
    /// 2. Pick an identity for this call
    /// 3. GET; on a retryable status back off and try again while the
    ///    retry budget lasts
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - 2xx response
    /// * `Err(FetchError)` - Classified failure
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let pause = self.pacing.sample();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let request = PageRequest {
            url: url.to_string(),
            user_agent: self.pick_identity().to_string(),
            timeout: self.timeout,
            accept_language: self.accept_language.clone(),
        };

        let mut retries = 0;
        loop {
            tracing::debug!("GET {} (attempt {})", url, retries + 1);

            let response = self
                .transport
                .get(&request)
                .await
                .map_err(|e| FetchError::Network {
                    url: url.to_string(),
                    message: if e.timeout {
                        format!("{} after {:?}", e.message, self.timeout)
                    } else {
                        e.message
                    },
                })?;
            let status = response.status;

            if (200..300).contains(&status) {
                return Ok(FetchedPage {
                    url: url.to_string(),
                    status,
                    body: response.body,
                });
            }

            if self.retry.should_retry(status, retries) {
                retries += 1;
                let delay = self.retry.backoff(retries, response.retry_after);
                tracing::debug!(
                    "HTTP {} from {}, retry {}/{} in {:?}",
                    status,
                    url,
                    retries,
                    self.retry.max_retries(),
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if self.retry.is_retryable(status) {
                return Err(FetchError::TransientExhausted {
                    url: url.to_string(),
                    status,
                    attempts: retries + 1,
                });
            }

            return Err(FetchError::ClientError {
                url: url.to_string(),
                status,
            });
        }
    }
}
