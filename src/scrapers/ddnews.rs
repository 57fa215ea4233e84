//! DD News article adapter.
//!
//! DD News (`ddnews.gov.in`) pages carry no per-article byline and expose the
//! section through a breadcrumb trail, so the category comes from the last
//! breadcrumb link rather than the URL.

use super::{Rules, SourceAdapter, fill_from_structured};
use crate::error::ExtractionFailure;
use crate::models::ArticleFields;
use scraper::Html;
use tracing::{debug, instrument};

const RULES: Rules = Rules {
    title: &["h1.title"],
    body: &["div.field-name-body"],
    paragraph: "p",
    skip_within: &[],
    date: &["span.date-display-single"],
    breadcrumb: Some("div.breadcrumb a:last-child"),
};

/// Adapter for DD News articles.
#[derive(Debug, Default, Clone, Copy)]
pub struct DdNews;

impl SourceAdapter for DdNews {
    fn name(&self) -> &'static str {
        "DD News"
    }

    #[instrument(level = "debug", skip_all, fields(source = self.name(), %url))]
    fn extract(&self, document: &Html, url: &str) -> Result<ArticleFields, ExtractionFailure> {
        let mut fields = RULES.apply(document, self.name());
        fill_from_structured(&mut fields, document);
        debug!(paragraphs = fields.paragraphs.len(), "Parsed DD News article");
        Ok(fields)
    }
}
