//! BBC News article adapter.
//!
//! Handles article pages on `bbc.com` and `bbc.co.uk`. Body text lives in
//! `text-block` components inside the page's `<article>`; the section name is
//! taken from the `/news/<section>` part of the URL.

use super::{Rules, SourceAdapter, fill_from_structured};
use crate::error::ExtractionFailure;
use crate::models::ArticleFields;
use crate::normalize::title_case_slug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{debug, instrument};

const RULES: Rules = Rules {
    title: &["h1#main-heading"],
    body: &["article"],
    paragraph: r#"div[data-component="text-block"] p"#,
    skip_within: &[],
    date: &["time"],
    breadcrumb: None,
};

static NEWS_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/news/([^/?#]+)").expect("static section regex is valid"));

/// Adapter for BBC News articles.
#[derive(Debug, Default, Clone, Copy)]
pub struct BbcNews;

impl SourceAdapter for BbcNews {
    fn name(&self) -> &'static str {
        "BBC News"
    }

    #[instrument(level = "debug", skip_all, fields(source = self.name(), %url))]
    fn extract(&self, document: &Html, url: &str) -> Result<ArticleFields, ExtractionFailure> {
        let mut fields = RULES.apply(document, self.name());
        fields.category = section_from_url(url);
        fill_from_structured(&mut fields, document);
        debug!(paragraphs = fields.paragraphs.len(), "Parsed BBC article");
        Ok(fields)
    }
}

/// `https://www.bbc.com/news/uk-politics-123` -> `Uk Politics 123`.
fn section_from_url(url: &str) -> Option<String> {
    NEWS_SECTION
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| title_case_slug(m.as_str()))
        .filter(|s| !s.is_empty())
}
