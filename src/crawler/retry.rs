//! Retry-on-status policy
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Status in the retry list, budget left | Back off, retry |
//! | Status in the retry list, budget spent | Transient failure |
//! | Any other non-2xx status | Fail immediately |
//! | Connection error / timeout | Fail immediately |

use crate::config::RetryConfig;
use std::time::Duration;

/// Decides which responses are retried and how long to wait in between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    statuses: Vec<u16>,
    max_retries: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl RetryPolicy {
    pub fn new(
        statuses: Vec<u16>,
        max_retries: u32,
        backoff_base: Duration,
        backoff_max: Duration,
    ) -> Self {
        Self {
            statuses,
            max_retries,
            backoff_base,
            backoff_max,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.statuses.clone(),
            config.max_retries,
            Duration::from_millis(config.backoff_base_ms),
            Duration::from_millis(config.backoff_max_ms),
        )
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(Vec::new(), 0, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn is_retryable(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    /// Whether another attempt follows a `status` response after
    /// `retries_done` retries
    pub fn should_retry(&self, status: u16, retries_done: u32) -> bool {
        self.is_retryable(status) && retries_done < self.max_retries
    }

    /// Delay before retry number `retry` (1-based): `base * 2^(retry - 1)`,
    /// capped. A longer server-provided `Retry-After` wins, under the same cap.
    pub fn backoff(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        let computed = self
            .backoff_base
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.backoff_max);
        let delay = match retry_after {
            Some(hint) => computed.max(hint),
            None => computed,
        };
        delay.min(self.backoff_max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
