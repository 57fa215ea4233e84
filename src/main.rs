//! `news_extract` binary: fetch article pages, run them through the
//! extraction engine and print one JSON object per URL.

use clap::Parser;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use news_extract::cli::Cli;
use news_extract::config::FetchConfig;
use news_extract::fetch::{FetchPage, HttpFetcher, RetryFetch};
use news_extract::outputs::json;
use news_extract::scrapers::hindustantimes::{self, INDIA_NEWS_URL};
use news_extract::utils::{ensure_writable_dir, truncate_for_log};
use news_extract::{ArticleRecord, ExtractionEngine, ExtractionFailure};
use scraper::Html;
use serde::Serialize;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

/// What gets printed for a URL that produced no record.
#[derive(Debug, Serialize)]
struct FailureReport {
    url: String,
    reason_code: String,
    detail: String,
}

/// Outcome of processing one URL.
enum Outcome {
    Extracted(ArticleRecord),
    Rejected(String, ExtractionFailure),
    FetchFailed(String, String),
}

impl Outcome {
    fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        let value = match self {
            Outcome::Extracted(record) => serde_json::to_value(record)?,
            Outcome::Rejected(url, failure) => serde_json::to_value(FailureReport {
                url: url.clone(),
                reason_code: failure.reason_code.to_string(),
                detail: failure.detail.clone(),
            })?,
            Outcome::FetchFailed(url, detail) => serde_json::to_value(FailureReport {
                url: url.clone(),
                reason_code: "fetch-error".to_string(),
                detail: detail.clone(),
            })?,
        };
        if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    if let Err(msg) = args.validate() {
        error!(%msg, "Invalid arguments");
        return Err(msg.into());
    }

    let config = args.apply_overrides(FetchConfig::load(args.config.as_deref()).await?);

    // Early check: ensure JSON output dir is writable
    if let Some(ref dir) = args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    let engine = ExtractionEngine::default();

    let outcomes: Vec<Outcome> = if let Some(ref path) = args.html_file {
        let html = tokio::fs::read_to_string(path).await?;
        let url = &args.urls[0];
        info!(%url, %path, "Extracting from local file");
        vec![match engine.extract_html(url, &html) {
            Ok(record) => Outcome::Extracted(record),
            Err(failure) => Outcome::Rejected(url.clone(), failure),
        }]
    } else {
        let fetcher = RetryFetch::from_config(HttpFetcher::new(&config)?, &config);

        let mut urls = args.urls.clone();
        if let Some(n) = args.latest {
            urls.extend(latest_urls(&fetcher, n).await?);
        }
        let urls = urls.into_iter().unique().collect_vec();
        info!(count = urls.len(), concurrency = args.concurrency, "Processing URLs");

        stream::iter(urls)
            .map(|url| {
                let fetcher = &fetcher;
                let engine = &engine;
                async move { process_url(fetcher, engine, url).await }
            })
            .buffered(args.concurrency)
            .collect()
            .await
    };

    let mut extracted = 0usize;
    for outcome in &outcomes {
        println!("{}", outcome.to_json(args.pretty)?);
        if let Outcome::Extracted(record) = outcome {
            extracted += 1;
            if let Some(ref dir) = args.json_output_dir {
                if let Err(e) = json::write_record(record, dir).await {
                    error!(url = %record.url, error = %e, "Failed to write article JSON");
                }
            }
        }
    }

    let failed = outcomes.len() - extracted;
    let elapsed = start_time.elapsed();
    info!(
        total = outcomes.len(),
        extracted,
        failed,
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );

    if extracted == 0 {
        return Err("no articles extracted".into());
    }
    Ok(())
}

/// Fetch one page and extract it. Unsupported URLs are rejected before any
/// request is made.
#[instrument(level = "info", skip(fetcher, engine))]
async fn process_url<F: FetchPage>(
    fetcher: &F,
    engine: &ExtractionEngine,
    url: String,
) -> Outcome {
    if let Err(failure) = engine.registry().resolve(&url) {
        warn!(error = %failure, "Skipping unsupported URL");
        return Outcome::Rejected(url, failure);
    }

    let body = match fetcher.fetch(&url).await {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Fetch failed");
            return Outcome::FetchFailed(url, e.to_string());
        }
    };

    match engine.extract_html(&url, &body) {
        Ok(record) => {
            debug!(preview = %truncate_for_log(&record.content, 200), "Article content");
            Outcome::Extracted(record)
        }
        Err(failure) => Outcome::Rejected(url, failure),
    }
}

/// Links to the `n` most recent stories on the Hindustan Times India section.
#[instrument(level = "info", skip(fetcher))]
async fn latest_urls<F: FetchPage>(fetcher: &F, n: usize) -> Result<Vec<String>, Box<dyn Error>> {
    let base = Url::parse(INDIA_NEWS_URL)?;
    let html = fetcher.fetch(INDIA_NEWS_URL).await?;
    let document = Html::parse_document(&html);
    let mut links = hindustantimes::index_links(&document, &base)?;
    links.truncate(n);
    info!(count = links.len(), "Selected latest stories");
    Ok(links)
}
