//! Crawler module for page fetching and processing
//!
//! This module contains the crawl pipeline, including:
//! - A bare HTTP transport and the retrying, paced fetcher on top of it
//! - Listing page parsing and keyword filtering
//! - The two parallel phases (listing crawl, discussion collection)
//! - Overall run coordination

mod collector;
mod coordinator;
mod fetcher;
mod listing;
mod parser;
mod retry;
#[cfg(test)]
pub(crate) mod test_support;
pub mod transport;

pub use collector::DetailCollector;
pub use coordinator::{run_pipeline, Coordinator, CrawlJob, RunOutcome};
pub use fetcher::{FetchError, FetchedPage, Fetcher, Pacing};
pub use listing::{listing_urls, ListingCrawler, ListingMatch, MatchSet};
pub use parser::{extract_discussion_links, find_matches, matches_keyword, DISCUSSION_PATH_PREFIX};
pub use retry::RetryPolicy;
pub use transport::{build_http_client, PageRequest, ReqwestTransport, Transport, TransportError, TransportResponse};
