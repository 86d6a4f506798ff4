use discussion_scraper::{CrawlJob, ScraperConfig};
use std::path::PathBuf;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_ROOT: &str = "/discussions/acme/";

/// Configuration without pacing or backoff so tests run fast
pub fn test_config() -> ScraperConfig {
    let mut config = ScraperConfig::default();
    config.fetch.delay_ms = 0;
    config.fetch.listing_jitter_ms = 0;
    config.fetch.detail_jitter_ms = 0;
    config.fetch.timeout_secs = 5;
    config.retry.backoff_base_ms = 0;
    config.retry.backoff_max_ms = 0;
    config
}

pub fn job(server: &MockServer, keyword: &str, pages: u32, output: PathBuf) -> CrawlJob {
    CrawlJob {
        base: Url::parse(&format!("{}{}", server.uri(), LISTING_ROOT))
            .expect("Failed to parse base URL"),
        keyword: keyword.to_string(),
        pages,
        concurrency: 3,
        output,
    }
}

/// Listing page with one anchor per `(href, text)`
pub fn listing_html(links: &[(&str, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(href, text)| format!("<li><a href=\"{}\">{}</a></li>\n", href, text))
        .collect();
    format!(
        "<html><head><title>Discussions</title></head><body><ul>\n{}</ul>\
         <a href=\"/discussions/acme/2/\">Next</a></body></html>",
        anchors
    )
}

/// Discussion page with a header, one choice pair and one comment
pub fn discussion_html(title: &str, comment: &str) -> String {
    format!(
        r#"<html><head><title>{title} - Site</title></head><body>
<h1 class="discussion-list-header">{title}</h1>
<div class="question-body">
  <p class="card-text">What is the answer?</p>
  <div class="question-choices-container"><ul>
    <li class="multi-choice-item"><span class="multi-choice-letter">A.</span> First</li>
    <li class="multi-choice-item"><span class="multi-choice-letter">B.</span> Second</li>
  </ul></div>
  <span class="correct-answer">A</span>
  <div class="voting-summary"><div class="vote-bar">A (80%)</div><div class="vote-bar">B (20%)</div></div>
</div>
<div class="discussion-container">
  <div class="comment-container">
    <h5 class="comment-username">reviewer</h5>
    <span class="comment-date" title="Fri 05 Jan 2024 09:30">9 months ago</span>
    <div class="comment-selected-answers">Selected Answer: <span>A</span></div>
    <div class="comment-content">{comment}</div>
  </div>
</div>
</body></html>"#
    )
}

pub async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}
