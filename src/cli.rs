//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags, and the fetch settings
//! via environment variables as well. Flags override values from the YAML
//! config file.

use crate::config::FetchConfig;
use clap::Parser;

/// Extract structured article data from supported news pages.
///
/// # Examples
///
/// ```sh
/// # Fetch and extract two articles
/// news_extract https://www.bbc.com/news/articles/c0000000 https://ddnews.gov.in/en/story
///
/// # Extract from a page saved locally
/// news_extract https://www.bbc.com/news/weather-68000000 --html-file page.html
///
/// # Extract the five latest Hindustan Times India stories into ./json
/// news_extract --latest 5 -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article URLs to extract
    pub urls: Vec<String>,

    /// Read the page from this file instead of fetching it (needs exactly one URL)
    #[arg(long)]
    pub html_file: Option<String>,

    /// Also extract the N latest stories from the Hindustan Times India news section
    #[arg(long, value_name = "N")]
    pub latest: Option<usize>,

    /// Write each extracted record to this directory as JSON
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Optional path to a YAML fetch config
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of pages fetched at once
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Pretty-print JSON on stdout
    #[arg(long)]
    pub pretty: bool,

    /// User-Agent header sent when fetching
    #[arg(long, env = "NEWS_EXTRACT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "NEWS_EXTRACT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Retries after a failed fetch
    #[arg(long, env = "NEWS_EXTRACT_MAX_RETRIES")]
    pub max_retries: Option<usize>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut config: FetchConfig) -> FetchConfig {
        if let Some(ref user_agent) = self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        config
    }

    /// Check option combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.html_file.is_some() && (self.urls.len() != 1 || self.latest.is_some()) {
            return Err("--html-file needs exactly one URL and no --latest".to_string());
        }
        if self.urls.is_empty() && self.latest.is_none() {
            return Err("nothing to do: pass article URLs or --latest N".to_string());
        }
        if self.concurrency == 0 {
            return Err("--concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}
