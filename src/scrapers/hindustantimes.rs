//! Hindustan Times article adapter.
//!
//! Hindustan Times has shipped several page templates over the years, so each
//! field carries a longer fallback chain than the other sources. Section pages
//! such as `https://www.hindustantimes.com/india-news` list article links
//! under `h3.hdg3` headings; [`index_links`] collects them.
//!
//! # URL Pattern
//!
//! Article URLs look like
//! `https://www.hindustantimes.com/india-news/some-story-101714000000000.html`;
//! the leading path segment names the section.

use super::{Rules, SourceAdapter, fill_from_structured};
use crate::error::ExtractionFailure;
use crate::models::ArticleFields;
use crate::normalize::title_case_slug;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

/// Section page listing the latest national stories.
pub const INDIA_NEWS_URL: &str = "https://www.hindustantimes.com/india-news";

const RULES: Rules = Rules {
    title: &["h1.hdg1", "h1.article-title", "h1"],
    body: &[
        "div.storyDetails, article.storyDetails",
        "div.detail, article.detail",
        "div.article-body, article.article-body",
    ],
    paragraph: "p",
    skip_within: &["script", "style", "nav", "header", "footer"],
    date: &[
        "span.dateTime, time.dateTime",
        "span.article-date, time.article-date",
        r#"meta[property="article:published_time"]"#,
    ],
    breadcrumb: None,
};

/// Adapter for Hindustan Times articles.
#[derive(Debug, Default, Clone, Copy)]
pub struct HindustanTimes;

impl SourceAdapter for HindustanTimes {
    fn name(&self) -> &'static str {
        "Hindustan Times"
    }

    #[instrument(level = "debug", skip_all, fields(source = self.name(), %url))]
    fn extract(&self, document: &Html, url: &str) -> Result<ArticleFields, ExtractionFailure> {
        let mut fields = RULES.apply(document, self.name());
        fields.category = section_from_url(url);
        fill_from_structured(&mut fields, document);
        debug!(paragraphs = fields.paragraphs.len(), "Parsed Hindustan Times article");
        Ok(fields)
    }
}

/// Leading path segment of an article URL, when the path has room for one
/// besides the article slug.
fn section_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return None;
    }
    Some(title_case_slug(segments[0])).filter(|s| !s.is_empty())
}

/// Collect article links from a section page.
///
/// Links are taken from `h3.hdg3 a[href]` in document order and resolved
/// against `base`; links that cannot be resolved are skipped.
#[instrument(level = "info", skip_all, fields(%base))]
pub fn index_links(document: &Html, base: &Url) -> Result<Vec<String>, ExtractionFailure> {
    let selector = Selector::parse("h3.hdg3 a[href]")
        .map_err(|e| ExtractionFailure::extraction_error("Hindustan Times", format!("{e:?}")))?;

    let mut article_urls = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Ok(resolved) = base.join(href.trim()) {
                article_urls.push(resolved.to_string());
            }
        }
    }

    info!(count = article_urls.len(), "Indexed Hindustan Times article URLs");
    debug!(urls = ?article_urls, "Hindustan Times URLs");
    Ok(article_urls)
}
