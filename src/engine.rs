//! The extraction pipeline: source lookup, adapter, record assembly and
//! validation.
//!
//! # Validation
//!
//! A record is accepted as long as either the headline or the body is real.
//! Only when both degrade to placeholders does the engine report
//! [`ReasonCode::NoContent`](crate::error::ReasonCode::NoContent), regardless
//! of how many weaker fields (date, category) were found.

use crate::error::ExtractionFailure;
use crate::models::ArticleRecord;
use crate::normalize::normalize;
use crate::registry::SourceRegistry;
use scraper::Html;
use tracing::{error, info, instrument, warn};

/// Turns article pages into [`ArticleRecord`]s.
///
/// The engine is synchronous and holds only the immutable registry, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    registry: SourceRegistry,
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new(SourceRegistry::builtin())
    }
}

impl ExtractionEngine {
    pub fn new(registry: SourceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Extract an article from an already parsed page served at `url`.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub fn extract(&self, url: &str, document: &Html) -> Result<ArticleRecord, ExtractionFailure> {
        let adapter = self.registry.resolve(url).inspect_err(|e| {
            warn!(error = %e, "Rejected unsupported source");
        })?;

        let mut fields = adapter.extract(document, url).inspect_err(|e| {
            error!(source = adapter.name(), error = %e, "Adapter failed");
        })?;
        if normalize(&fields.author).is_empty() {
            fields.author = adapter.name().to_string();
        }

        let record = ArticleRecord::assemble(fields, url);
        if !record.has_title() && !record.has_content() {
            error!(source = adapter.name(), "Failed to extract both title and content");
            return Err(ExtractionFailure::no_content(url));
        }

        info!(
            source = adapter.name(),
            has_title = record.has_title(),
            paragraphs = record.paragraph_count,
            words = record.word_count,
            "Extracted article"
        );
        Ok(record)
    }

    /// Parse raw markup and extract from it.
    ///
    /// Unsupported URLs are rejected before the markup is parsed.
    pub fn extract_html(&self, url: &str, html: &str) -> Result<ArticleRecord, ExtractionFailure> {
        self.registry.resolve(url)?;
        let document = Html::parse_document(html);
        self.extract(url, &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReasonCode;
    use crate::models::{ArticleFields, CONTENT_NOT_FOUND, DATE_NOT_FOUND, TITLE_NOT_FOUND};
    use crate::scrapers::SourceAdapter;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns canned fields and counts how often it runs.
    struct Canned {
        fields: ArticleFields,
        calls: AtomicUsize,
    }

    impl SourceAdapter for Canned {
        fn name(&self) -> &'static str {
            "Canned"
        }

        fn extract(
            &self,
            _document: &Html,
            _url: &str,
        ) -> Result<ArticleFields, ExtractionFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fields.clone())
        }
    }

    struct Exploding;

    impl SourceAdapter for Exploding {
        fn name(&self) -> &'static str {
            "Exploding"
        }

        fn extract(
            &self,
            _document: &Html,
            _url: &str,
        ) -> Result<ArticleFields, ExtractionFailure> {
            Err(ExtractionFailure::extraction_error(self.name(), "unexpected layout"))
        }
    }

    fn canned(fields: ArticleFields) -> (ExtractionEngine, Arc<Canned>) {
        let adapter = Arc::new(Canned {
            fields,
            calls: AtomicUsize::new(0),
        });
        let registry = SourceRegistry::empty().with_source("canned.test", adapter.clone());
        (ExtractionEngine::new(registry), adapter)
    }

    fn empty_doc() -> Html {
        Html::parse_document("<html></html>")
    }

    const LONG: &str = "A paragraph comfortably over the threshold.";

    #[test]
    fn test_unsupported_source_skips_adapters() {
        let (engine, adapter) = canned(ArticleFields::default());
        let err = engine.extract("https://unknown.test/a", &empty_doc()).unwrap_err();

        assert_eq!(err.reason_code, ReasonCode::UnsupportedSource);
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_adapter_error_is_extraction_error() {
        let registry = SourceRegistry::empty().with_source("boom.test", Arc::new(Exploding));
        let engine = ExtractionEngine::new(registry);
        let err = engine.extract("https://boom.test/a", &empty_doc()).unwrap_err();

        assert_eq!(err.reason_code, ReasonCode::ExtractionError);
        assert_eq!(err.detail, "Exploding: unexpected layout");
    }

    #[test]
    fn test_title_only_is_success() {
        let (engine, adapter) = canned(ArticleFields {
            title: Some("Only a headline".to_string()),
            author: "Canned".to_string(),
            ..Default::default()
        });
        let record = engine.extract("https://canned.test/a", &empty_doc()).unwrap();

        assert_eq!(record.title, "Only a headline");
        assert_eq!(record.content, CONTENT_NOT_FOUND);
        assert_eq!(record.date, DATE_NOT_FOUND);
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_content_only_is_success() {
        let (engine, _) = canned(ArticleFields {
            paragraphs: vec![LONG.to_string()],
            author: "Canned".to_string(),
            ..Default::default()
        });
        let record = engine.extract("https://canned.test/a", &empty_doc()).unwrap();

        assert_eq!(record.title, TITLE_NOT_FOUND);
        assert_eq!(record.content, LONG);
        assert_eq!(record.paragraph_count, 1);
    }

    #[test]
    fn test_no_title_no_content_fails_despite_other_fields() {
        let (engine, _) = canned(ArticleFields {
            date: Some("2024-01-01".to_string()),
            category: Some("Weather".to_string()),
            author: "Canned".to_string(),
            ..Default::default()
        });
        let err = engine.extract("https://canned.test/a", &empty_doc()).unwrap_err();

        assert_eq!(err.reason_code, ReasonCode::NoContent);
    }

    #[test]
    fn test_blank_author_defaults_to_source_name() {
        let (engine, _) = canned(ArticleFields {
            title: Some("Headline".to_string()),
            author: " \u{200b} ".to_string(),
            ..Default::default()
        });
        let record = engine.extract("https://canned.test/a", &empty_doc()).unwrap();
        assert_eq!(record.author, "Canned");

        let (engine, _) = canned(ArticleFields {
            title: Some("Headline".to_string()),
            ..Default::default()
        });
        let record = engine.extract("https://canned.test/a", &empty_doc()).unwrap();
        assert_eq!(record.author, "Canned");
    }

    #[test]
    fn test_fields_are_normalized() {
        let (engine, _) = canned(ArticleFields {
            title: Some(" \u{200b}Spaced\u{a0}out  title ".to_string()),
            category: Some(" Top\nStories ".to_string()),
            author: "Canned".to_string(),
            ..Default::default()
        });
        let record = engine.extract("https://canned.test/a", &empty_doc()).unwrap();

        assert_eq!(record.title, "Spaced out title");
        assert_eq!(record.category, "Top Stories");
    }

    #[test]
    fn test_storm_scenario() {
        let thirty = "Rain lashed the shore all day.";
        assert_eq!(thirty.chars().count(), 30);
        let html = format!(
            r#"<html><body>
                <h1 id="main-heading">Storm hits coast</h1>
                <article>
                    <div data-component="text-block"><p>{thirty}</p></div>
                    <div data-component="text-block"><p>Ten chars.</p></div>
                </article>
            </body></html>"#
        );
        let url = "https://www.bbc.com/news/weather/68000000";
        let record = ExtractionEngine::default().extract_html(url, &html).unwrap();

        assert_eq!(record.title, "Storm hits coast");
        assert_eq!(record.content, thirty);
        assert_eq!(record.category, "Weather");
        assert_eq!(record.author, "BBC News");
        assert_eq!(record.paragraph_count, 1);
        assert_eq!(record.word_count, 6);
        assert_eq!(record.url, url);
    }

    #[test]
    fn test_unsupported_url_through_html_entry_point() {
        let err = ExtractionEngine::default()
            .extract_html("https://www.example.org/story", "<h1>Anything</h1>")
            .unwrap_err();
        assert_eq!(err.reason_code, ReasonCode::UnsupportedSource);
    }

    #[test]
    fn test_builtin_page_without_content_fails() {
        let err = ExtractionEngine::default()
            .extract_html(
                "https://ddnews.gov.in/en/x",
                r#"<span class="date-display-single">10 April 2024</span>
                   <div class="breadcrumb"><a>National</a></div>"#,
            )
            .unwrap_err();
        assert_eq!(err.reason_code, ReasonCode::NoContent);
    }
}
