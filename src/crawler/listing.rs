//! Listing crawler
//!
//! Fans out one fetch per listing page over a bounded pool, keeps the
//! discussion links matching the keyword, and merges them into a shared,
//! URL-deduplicated [`MatchSet`].

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::find_matches;
use crate::ScrapeError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// A discussion link found on a listing page; `url` is the dedup key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingMatch {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Default)]
struct MatchSetInner {
    seen: HashSet<String>,
    matches: Vec<ListingMatch>,
}

/// Matches collected across listing workers
///
/// Every membership check and insert happens under the one lock, so no two
/// entries ever share a URL whatever order the pages complete in.
#[derive(Debug, Default)]
pub struct MatchSet {
    inner: Mutex<MatchSetInner>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the matches whose URL is not present yet; returns how many were new
    pub fn merge(&self, candidates: Vec<ListingMatch>) -> usize {
        // The data is append-only, so a poisoned lock still holds a valid set.
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut added = 0;
        for candidate in candidates {
            if inner.seen.insert(candidate.url.clone()) {
                inner.matches.push(candidate);
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .matches
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the matches in insertion order
    pub fn snapshot(&self) -> Vec<ListingMatch> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .matches
            .clone()
    }

    pub fn into_matches(self) -> Vec<ListingMatch> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .matches
    }
}

/// Builds the listing page URLs `<base>/1/` through `<base>/<pages>/`
///
/// The base is normalized to end in exactly one slash first, so `.../acme`
/// and `.../acme/` give the same pages.
pub fn listing_urls(base: &Url, pages: u32) -> Result<Vec<Url>, ScrapeError> {
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(ScrapeError::InvalidBaseUrl(base.to_string()));
    }

    let mut root = base.clone();
    let path = format!("{}/", base.path().trim_end_matches('/'));
    root.set_path(&path);
    root.set_query(None);
    root.set_fragment(None);

    (1..=pages)
        .map(|index| root.join(&format!("{}/", index)).map_err(ScrapeError::from))
        .collect()
}

/// Crawls listing pages in parallel and collects matching links
#[derive(Clone)]
pub struct ListingCrawler {
    fetcher: Fetcher,
    concurrency: usize,
}

impl ListingCrawler {
    pub fn new(fetcher: Fetcher, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetches every listing page and returns the deduplicated matches
    ///
    /// Returns once all dispatched fetches have completed. A 404 page or any
    /// other failed page contributes nothing; the rest still count.
    pub async fn crawl(&self, pages: &[Url], keyword: &str) -> Vec<ListingMatch> {
        tracing::info!(
            "Crawling {} listing pages with concurrency={}",
            pages.len(),
            self.concurrency
        );

        let collected = Arc::new(MatchSet::new());
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let keyword: Arc<str> = Arc::from(keyword);
        let mut workers = JoinSet::new();

        for page in pages {
            let page = page.clone();
            let fetcher = self.fetcher.clone();
            let collected = Arc::clone(&collected);
            let semaphore = Arc::clone(&semaphore);
            let keyword = Arc::clone(&keyword);

            workers.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                crawl_listing_page(&fetcher, &page, &keyword, &collected).await;
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Listing worker failed: {}", e);
            }
        }

        let matches = match Arc::try_unwrap(collected) {
            Ok(set) => set.into_matches(),
            Err(shared) => shared.snapshot(),
        };
        tracing::info!("Crawl complete, total matches: {}", matches.len());
        matches
    }
}

/// Fetches one listing page and merges its matches
async fn crawl_listing_page(fetcher: &Fetcher, page: &Url, keyword: &str, collected: &MatchSet) {
    let fetched = match fetcher.fetch(page.as_str()).await {
        Ok(fetched) => fetched,
        Err(e) if e.is_not_found() => {
            tracing::warn!("Listing {} not found (404), skipping", page);
            return;
        }
        Err(e) => {
            tracing::warn!("Error fetching listing {}: {}", page, e);
            return;
        }
    };

    let matches = find_matches(&fetched.body, page, keyword);
    let added = collected.merge(matches);
    if added > 0 {
        tracing::info!("Found {} new matches on {}", added, page);
    }
}
