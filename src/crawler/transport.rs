//! Bare HTTP transport
//!
//! A single GET with no retries and no pacing. The [`Transport`] trait is the
//! seam the fetcher's retry policy wraps, so both crawl phases can run
//! against a scripted transport in tests.

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, RETRY_AFTER, USER_AGENT};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// One GET request as issued by the fetcher
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub accept_language: Option<String>,
}

/// A response of any status
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
    /// Parsed `Retry-After` header (delta-seconds form only)
    pub retry_after: Option<Duration>,
}

/// Connection-level failure: DNS, refused connection, TLS, timeout, body read
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timeout: bool,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &PageRequest) -> Result<TransportResponse, TransportError>;
}

/// Builds the HTTP client shared by every request of a run
///
/// Identity and timeout are set per request, so the client only carries the
/// connection-level settings.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &PageRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .header(USER_AGENT, &request.user_agent);
        if let Some(language) = &request.accept_language {
            builder = builder.header(ACCEPT_LANGUAGE, language);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body = response.text().await.map_err(classify)?;

        Ok(TransportResponse {
            status,
            body,
            retry_after,
        })
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError {
            message: "Request timeout".to_string(),
            timeout: true,
        }
    } else if e.is_connect() {
        TransportError {
            message: format!("Connection failed: {}", e),
            timeout: false,
        }
    } else {
        TransportError {
            message: e.to_string(),
            timeout: false,
        }
    }
}

/// Parses the delta-seconds form of `Retry-After`; HTTP dates are ignored
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
