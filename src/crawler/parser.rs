//! Listing page parser
//!
//! Extracts candidate discussion links from a listing page and applies the
//! keyword filter.

use crate::crawler::listing::ListingMatch;
use crate::extract::text::{stripped_text, ANCHOR};
use scraper::Html;
use url::Url;

/// Path prefix every genuine discussion link starts with
pub const DISCUSSION_PATH_PREFIX: &str = "/discussions/";

/// Parses a listing page and returns its discussion links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` whose trimmed href starts with `/discussions/`
///
/// **Exclude:**
/// - Absolute or other relative hrefs, even when pointing at the same site
/// - Anchors without visible text
///
/// The visible text is the concatenation of the anchor's trimmed text
/// nodes. Hrefs are resolved against `page_url`.
///
/// # Example
///
/// ```
/// use discussion_scraper::crawler::extract_discussion_links;
/// use url::Url;
///
/// let html = r#"<a href="/discussions/acme/view/1-exam-x/">Exam X topic 1</a>"#;
/// let page = Url::parse("https://example.com/discussions/acme/1/").unwrap();
/// let links = extract_discussion_links(html, &page);
/// assert_eq!(links[0].url, "https://example.com/discussions/acme/view/1-exam-x/");
/// ```
pub fn extract_discussion_links(html: &str, page_url: &Url) -> Vec<ListingMatch> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if !href.starts_with(DISCUSSION_PATH_PREFIX) {
            continue;
        }

        let title = stripped_text(element);
        if title.is_empty() {
            continue;
        }

        match page_url.join(href) {
            Ok(url) => links.push(ListingMatch {
                title,
                url: url.to_string(),
            }),
            Err(e) => tracing::debug!("Skipping unresolvable href {}: {}", href, e),
        }
    }

    links
}

/// Case-insensitive substring match of `keyword` in `title`
pub fn matches_keyword(title: &str, keyword: &str) -> bool {
    title.to_lowercase().contains(&keyword.to_lowercase())
}

/// Extracts the links of a listing page whose text contains `keyword`
pub fn find_matches(html: &str, page_url: &Url, keyword: &str) -> Vec<ListingMatch> {
    extract_discussion_links(html, page_url)
        .into_iter()
        .filter(|link| matches_keyword(&link.title, keyword))
        .collect()
}
