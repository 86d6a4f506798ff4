//! Discussion-Scraper main entry point
//!
//! This is the command-line interface for the discussion scraper.

use anyhow::Context;
use clap::Parser;
use discussion_scraper::config::resolve_config;
use discussion_scraper::{run_pipeline, CrawlJob, RunOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Download keyword-matching discussions to a JSON file
///
/// Crawls the paginated listing under --base, keeps the discussion links
/// whose text contains --keyword, downloads each discussion and writes the
/// extracted questions, answers and comments as one JSON array.
#[derive(Parser, Debug)]
#[command(name = "discussion-scraper")]
#[command(version)]
#[command(about = "Download discussions matching a keyword to a JSON file", long_about = None)]
struct Cli {
    /// Base discussion listing URL (e.g. https://www.example.com/discussions/acme/)
    #[arg(long, value_name = "URL")]
    base: Url,

    /// Keyword or exam name to match in link text (case-insensitive)
    #[arg(long)]
    keyword: String,

    /// Number of listing pages to crawl (negative means none)
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pages: i64,

    /// Number of parallel downloads (minimum 1)
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    concurrency: i64,

    /// Output JSON file
    #[arg(long, default_value = "questions.json")]
    output: PathBuf,

    /// Optional TOML file with pacing, retry and identity settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the base delay before each request (milliseconds)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = resolve_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid default configuration".to_string(),
    })?;
    if let Some(delay_ms) = cli.delay_ms {
        config.fetch.delay_ms = delay_ms;
    }

    let job = CrawlJob {
        base: cli.base,
        keyword: cli.keyword,
        pages: page_count(cli.pages),
        concurrency: worker_count(cli.concurrency),
        output: cli.output,
    };

    let outcome = match run_pipeline(config, &job).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e).context("Scrape aborted");
        }
    };

    match outcome {
        RunOutcome::NoMatches => println!("No matches found."),
        RunOutcome::Written { count, path } => {
            println!();
            println!("✅ Downloaded {} discussions matching '{}'.", count, job.keyword);
            println!("JSON data saved to: {}", path.display());
        }
    }

    Ok(())
}

/// Listing pages to probe; negative counts mean none
fn page_count(pages: i64) -> u32 {
    u32::try_from(pages.max(0)).unwrap_or(u32::MAX)
}

/// Worker pool size, at least 1
fn worker_count(concurrency: i64) -> usize {
    usize::try_from(concurrency.max(1)).unwrap_or(usize::MAX)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("discussion_scraper=info,warn"),
            1 => EnvFilter::new("discussion_scraper=debug,info"),
            2 => EnvFilter::new("discussion_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
