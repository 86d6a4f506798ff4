//! Crawler coordinator - main run orchestration logic
//!
//! A run goes through these steps, each finishing before the next starts:
//! - Crawl-policy check (fatal on an explicit deny)
//! - Listing phase: fetch every listing page, collect matching links
//! - Detail phase: fetch every matched discussion, extract records
//! - Sort and write the records

use crate::config::ScraperConfig;
use crate::crawler::collector::DetailCollector;
use crate::crawler::fetcher::{Fetcher, Pacing};
use crate::crawler::listing::{listing_urls, ListingCrawler};
use crate::crawler::transport::{ReqwestTransport, Transport};
use crate::output::write_records;
use crate::robots::check_permission;
use crate::ScrapeError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// What one invocation should scrape
#[derive(Debug, Clone)]
pub struct CrawlJob {
    /// Root of the paginated discussion listing
    pub base: Url,
    /// Case-insensitive filter on link text
    pub keyword: String,
    /// Number of listing pages to probe, starting at 1
    pub pages: u32,
    /// Worker pool size for both phases (0 is treated as 1)
    pub concurrency: usize,
    /// Where the JSON document goes
    pub output: PathBuf,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing to write; no file was created
    NoMatches,
    /// `count` records written to the absolute path `path`
    Written { count: usize, path: PathBuf },
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: ScraperConfig,
    transport: Arc<dyn Transport>,
}

impl Coordinator {
    /// Creates a coordinator that talks to the network through `reqwest`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - The HTTP client could not be built
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ScraperConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Runs the whole pipeline for `job`
    ///
    /// Per-page failures never fail the run. Only an invalid base URL, a
    /// policy denial or the final write do.
    pub async fn run(&self, job: &CrawlJob) -> Result<RunOutcome, ScrapeError> {
        let pages = listing_urls(&job.base, job.pages)?;
        let concurrency = job.concurrency.max(1);

        let decision = check_permission(
            self.transport.as_ref(),
            &job.base,
            self.config.identity.primary(),
            self.config.fetch.timeout(),
        )
        .await;
        if !decision.is_allowed() {
            return Err(ScrapeError::PolicyDenied {
                url: job.base.to_string(),
            });
        }

        let delay = self.effective_delay(decision.crawl_delay());
        let fetcher = Fetcher::from_config(Arc::clone(&self.transport), &self.config);

        let listing_fetcher = fetcher.clone().with_pacing(Pacing::new(
            delay,
            Duration::from_millis(self.config.fetch.listing_jitter_ms),
        ));
        let matches = ListingCrawler::new(listing_fetcher, concurrency)
            .crawl(&pages, &job.keyword)
            .await;

        if matches.is_empty() {
            tracing::info!("No discussions matching '{}'", job.keyword);
            return Ok(RunOutcome::NoMatches);
        }

        let detail_fetcher = fetcher
            .with_pacing(Pacing::new(
                delay,
                Duration::from_millis(self.config.fetch.detail_jitter_ms),
            ))
            .with_accept_language(self.config.fetch.accept_language.clone());
        let records = DetailCollector::new(detail_fetcher, concurrency)
            .collect(&matches)
            .await;

        if records.is_empty() {
            tracing::warn!(
                "None of the {} matched discussions could be collected",
                matches.len()
            );
            return Ok(RunOutcome::NoMatches);
        }

        let count = records.len();
        let path = write_records(records, &job.output)?;
        tracing::info!("Wrote {} records to {}", count, path.display());

        Ok(RunOutcome::Written { count, path })
    }

    /// Configured base delay, raised to the site's crawl delay if that is longer
    fn effective_delay(&self, crawl_delay: Option<Duration>) -> Duration {
        let configured = Duration::from_millis(self.config.fetch.delay_ms);
        match crawl_delay {
            Some(requested) if requested > configured => {
                tracing::info!(
                    "Raising request delay from {:?} to the site's crawl delay of {:?}",
                    configured,
                    requested
                );
                requested
            }
            _ => configured,
        }
    }
}

/// Runs a complete scrape with the network transport
///
/// # Example
///
/// ```no_run
/// use discussion_scraper::{run_pipeline, CrawlJob, ScraperConfig};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let job = CrawlJob {
///     base: Url::parse("https://www.example.com/discussions/acme/")?,
///     keyword: "AZ-900".to_string(),
///     pages: 10,
///     concurrency: 4,
///     output: "questions.json".into(),
/// };
/// run_pipeline(ScraperConfig::default(), &job).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: ScraperConfig, job: &CrawlJob) -> Result<RunOutcome, ScrapeError> {
    Coordinator::new(config)?.run(job).await
}
