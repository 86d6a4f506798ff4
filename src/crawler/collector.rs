//! Detail collector
//!
//! Fetches every matched discussion page over a bounded pool and turns each
//! one into a [`Record`]. Items that fail are logged and dropped.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::ListingMatch;
use crate::extract::{extract_record, Record};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Clone)]
pub struct DetailCollector {
    fetcher: Fetcher,
    concurrency: usize,
}

impl DetailCollector {
    pub fn new(fetcher: Fetcher, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Downloads and extracts all matches
    ///
    /// The result holds one record per page that was fetched successfully,
    /// in completion order; it is never larger than `matches`.
    pub async fn collect(&self, matches: &[ListingMatch]) -> Vec<Record> {
        tracing::info!(
            "Downloading {} discussions with concurrency={}",
            matches.len(),
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut workers = JoinSet::new();

        for item in matches {
            let url = item.url.clone();
            let fetcher = self.fetcher.clone();
            let semaphore = Arc::clone(&semaphore);

            workers.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                collect_one(&fetcher, &url).await
            });
        }

        let mut records = Vec::with_capacity(matches.len());
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!("Discussion worker failed: {}", e),
            }
        }

        let dropped = matches.len() - records.len();
        if dropped > 0 {
            tracing::warn!("{} of {} discussions could not be collected", dropped, matches.len());
        }
        records
    }
}

async fn collect_one(fetcher: &Fetcher, url: &str) -> Option<Record> {
    tracing::info!("Downloading {}", url);
    match fetcher.fetch(url).await {
        Ok(page) => Some(extract_record(&page.body, url)),
        Err(e) => {
            tracing::warn!("Failed to fetch or process {}: {}", url, e);
            None
        }
    }
}
