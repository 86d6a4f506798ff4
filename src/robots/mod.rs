//! Robots.txt handling module
//!
//! The crawl policy is checked once per run, before any other request.
//! Only an explicit deny stops the run; an unreachable or broken policy is
//! treated as permissive.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::transport::{PageRequest, Transport};
use std::time::Duration;
use url::Url;

/// Outcome of the crawl-policy check
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyDecision {
    /// The policy allows the base URL (or the site has none)
    Allowed {
        /// Crawl-delay declared for our identity, in seconds
        crawl_delay: Option<f64>,
    },
    /// The policy forbids the base URL
    Denied,
    /// The policy could not be obtained; proceed as allowed
    Unknown,
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, PolicyDecision::Denied)
    }

    /// Declared crawl delay; values that are not a positive, representable
    /// duration are ignored
    pub fn crawl_delay(&self) -> Option<Duration> {
        match self {
            PolicyDecision::Allowed {
                crawl_delay: Some(secs),
            } if *secs > 0.0 => match Duration::try_from_secs_f64(*secs) {
                Ok(delay) => Some(delay),
                Err(_) => {
                    tracing::warn!("Ignoring unusable Crawl-delay of {} seconds", secs);
                    None
                }
            },
            _ => None,
        }
    }
}

/// Location of the robots.txt governing `url`
pub fn robots_url(url: &Url) -> Option<Url> {
    if url.cannot_be_a_base() {
        return None;
    }
    url.join("/robots.txt").ok()
}

/// The product token robots.txt groups are matched against
///
/// `Mozilla/5.0 (X11; ...)` becomes `Mozilla`.
pub fn agent_token(user_agent: &str) -> &str {
    user_agent
        .split('/')
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .unwrap_or(user_agent)
}

/// Fetches robots.txt for `base` and decides whether `user_agent` may crawl it
///
/// # Status Handling
///
/// | Response | Decision |
/// |----------|----------|
/// | 2xx | Evaluate the body |
/// | 401 / 403 | Denied |
/// | Other 4xx | Allowed, no policy |
/// | 5xx, network error | Unknown |
///
/// # Arguments
///
/// * `transport` - Transport used for the single request
/// * `base` - The URL the run is about to crawl
/// * `user_agent` - Full identity string; matched by its product token
/// * `timeout` - Request timeout
pub async fn check_permission(
    transport: &dyn Transport,
    base: &Url,
    user_agent: &str,
    timeout: Duration,
) -> PolicyDecision {
    let Some(location) = robots_url(base) else {
        tracing::warn!("Cannot locate robots.txt for {}", base);
        return PolicyDecision::Unknown;
    };

    let request = PageRequest {
        url: location.to_string(),
        user_agent: user_agent.to_string(),
        timeout,
        accept_language: None,
    };

    let response = match transport.get(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not read robots.txt ({}): {}", location, e);
            return PolicyDecision::Unknown;
        }
    };

    let robots = match response.status {
        200..=299 => ParsedRobots::from_content(&response.body),
        401 | 403 => {
            tracing::warn!("robots.txt at {} is access-restricted ({})", location, response.status);
            return PolicyDecision::Denied;
        }
        400..=499 => ParsedRobots::allow_all(),
        status => {
            tracing::warn!("Could not read robots.txt ({}): HTTP {}", location, status);
            return PolicyDecision::Unknown;
        }
    };

    let token = agent_token(user_agent);
    if !robots.is_allowed(base.as_str(), token) {
        tracing::warn!("robots.txt disallows scraping {}", base);
        return PolicyDecision::Denied;
    }

    PolicyDecision::Allowed {
        crawl_delay: robots.crawl_delay(token),
    }
}
