//! Per-source extraction rules.
//!
//! Each supported outlet gets its own submodule holding a stateless adapter
//! that turns a parsed article page into [`ArticleFields`].
//!
//! # Supported Sources
//!
//! | Source | Module | Title | Body | Category |
//! |--------|--------|-------|------|----------|
//! | BBC News | [`bbcnews`] | `h1#main-heading` | `article` text blocks | `/news/<section>` in the URL |
//! | DD News | [`ddnews`] | `h1.title` | `div.field-name-body` | Breadcrumb trail |
//! | Hindustan Times | [`hindustantimes`] | `h1.hdg1`, `h1.article-title`, `h1` | `storyDetails`, `detail`, `article-body` | First URL path segment |
//!
//! # Common Patterns
//!
//! Adapters describe their layout as [`Rules`]: ordered selector lists per
//! field where the first selector that resolves wins. Missing elements leave
//! the field unset, and so does a selector that fails to parse: it is logged
//! and skipped without touching the other fields.
//! When the layout rules miss the headline or date, adapters fall back to the
//! page's JSON-LD metadata (see [`crate::structured`]).

use crate::error::ExtractionFailure;
use crate::models::ArticleFields;
use crate::normalize::normalize;
use crate::structured;
use scraper::{ElementRef, Html, Selector};
use std::ops::Deref;
use tracing::{debug, warn};

pub mod bbcnews;
pub mod ddnews;
pub mod hindustantimes;

/// Paragraphs at or below this many characters (after normalization) are
/// treated as captions, bylines or debris and dropped.
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// Attributes consulted for a date, ahead of the element's own text.
const DATE_ATTRIBUTES: [&str; 2] = ["datetime", "content"];

/// Extraction rules for one source.
///
/// A source adapter implements this contract for exactly one family of article
/// pages. Implementations hold no mutable state, so a single instance may be
/// shared across threads and calls.
pub trait SourceAdapter: Send + Sync {
    /// The source's canonical name, also used as the article author.
    fn name(&self) -> &'static str;

    /// Pull article fields out of `document`, which was served from `url`.
    ///
    /// Missing markup degrades the affected field to unset. An `Err` is
    /// reserved for conditions outside that case.
    fn extract(&self, document: &Html, url: &str) -> Result<ArticleFields, ExtractionFailure>;
}

/// Ordered selector chains describing a source's page layout.
#[derive(Debug, Clone, Copy)]
pub struct Rules {
    /// Headline candidates, tried in order.
    pub title: &'static [&'static str],
    /// Body container candidates, tried in order; the first that resolves is
    /// used exclusively.
    pub body: &'static [&'static str],
    /// Paragraph selector, scoped to the chosen container.
    pub paragraph: &'static str,
    /// Paragraphs nested in these elements (inside the container) are ignored.
    pub skip_within: &'static [&'static str],
    /// Date element candidates, tried in order.
    pub date: &'static [&'static str],
    /// Breadcrumb element whose text names the category, if the site has one.
    pub breadcrumb: Option<&'static str>,
}

impl Rules {
    /// Apply every rule chain to `document` on behalf of `source`.
    ///
    /// Each field is resolved on its own; a chain that finds nothing, or whose
    /// selectors fail to parse, leaves only that field unset.
    pub fn apply(&self, document: &Html, source: &str) -> ArticleFields {
        let title = first_text(document, &compile_all(source, self.title));
        let container = first_element(document, &compile_all(source, self.body));
        let paragraphs = match (container, compile(source, self.paragraph)) {
            (Some(container), Some(paragraph)) => {
                collect_paragraphs(container, &paragraph, self.skip_within)
            }
            (None, _) => {
                debug!(source, "No body container matched");
                Vec::new()
            }
            (Some(_), None) => Vec::new(),
        };
        let date = first_date(document, &compile_all(source, self.date));
        let category = self
            .breadcrumb
            .and_then(|css| compile(source, css))
            .and_then(|selector| first_text(document, &[selector]));

        ArticleFields {
            title,
            paragraphs,
            date,
            author: source.to_string(),
            category,
        }
    }
}

/// Fill a missing headline or date from the page's JSON-LD article block.
pub fn fill_from_structured(fields: &mut ArticleFields, document: &Html) {
    if fields.title.is_some() && fields.date.is_some() {
        return;
    }
    let Some(metadata) = structured::extract_structured(document) else {
        return;
    };
    if fields.title.is_none() {
        fields.title = structured::headline(&metadata)
            .map(|t| normalize(&t))
            .filter(|t| !t.is_empty());
        if fields.title.is_some() {
            debug!("Headline taken from JSON-LD");
        }
    }
    if fields.date.is_none() {
        fields.date = structured::date_published(&metadata)
            .map(|d| normalize(&d))
            .filter(|d| !d.is_empty());
    }
}

/// Whether a normalized paragraph is long enough to count as prose.
pub fn is_prose(text: &str) -> bool {
    text.chars().count() > MIN_PARAGRAPH_CHARS
}

fn compile(source: &str, css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(source, selector = css, error = ?e, "Skipping selector that failed to parse");
            None
        }
    }
}

fn compile_all(source: &str, css: &[&str]) -> Vec<Selector> {
    css.iter().filter_map(|c| compile(source, c)).collect()
}

/// Normalized text of an element, joining its text nodes without separators.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize(&element.text().collect::<String>())
}

/// First element matched by the first selector that matches anything.
fn first_element<'a>(document: &'a Html, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|s| document.select(s).next())
}

/// Text of the first element per selector, skipping selectors whose first
/// match is blank.
fn first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|s| document.select(s).next())
        .map(element_text)
        .find(|t| !t.is_empty())
}

fn first_date(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|s| document.select(s).next())
        .find_map(date_value)
}

/// Date carried by an element: `datetime`, then `content`, then its text.
pub fn date_value(element: ElementRef<'_>) -> Option<String> {
    DATE_ATTRIBUTES
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(normalize)
        .chain(std::iter::once(element_text(element)))
        .find(|v| !v.is_empty())
}

/// Prose paragraphs inside `container`, in document order.
fn collect_paragraphs(
    container: ElementRef<'_>,
    paragraph: &Selector,
    skip_within: &[&str],
) -> Vec<String> {
    container
        .select(paragraph)
        .filter(|p| !nested_in(*p, container, skip_within))
        .map(element_text)
        .filter(|t| is_prose(t))
        .collect()
}

/// Whether `element` sits inside one of `names` below `container`.
fn nested_in(element: ElementRef<'_>, container: ElementRef<'_>, names: &[&str]) -> bool {
    if names.is_empty() {
        return false;
    }
    let stop = Deref::deref(&container).id();
    Deref::deref(&element)
        .ancestors()
        .take_while(|node| node.id() != stop)
        .filter_map(|node| node.value().as_element())
        .any(|el| names.contains(&el.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: Rules = Rules {
        title: &["h1.primary", "h1"],
        body: &["div.story", "div.fallback"],
        paragraph: "p",
        skip_within: &["footer"],
        date: &["time", "meta[property=\"article:published_time\"]"],
        breadcrumb: Some("nav.crumbs a:last-child"),
    };

    #[test]
    fn test_paragraph_threshold_boundary() {
        assert!(!is_prose(&"x".repeat(20)));
        assert!(is_prose(&"x".repeat(21)));
    }

    #[test]
    fn test_rules_follow_priority_order() {
        let doc = Html::parse_document(
            r#"<html><body>
                <h1>Generic heading</h1>
                <h1 class="primary">Primary heading</h1>
                <div class="fallback"><p>This fallback paragraph is long enough.</p></div>
                <div class="story">
                    <p>The first story paragraph is long enough.</p>
                    <p>short one</p>
                    <footer><p>Footer paragraph that should be ignored.</p></footer>
                </div>
                <nav class="crumbs"><a>Home</a><a>Politics</a></nav>
            </body></html>"#,
        );
        let fields = RULES.apply(&doc, "Test Source");

        assert_eq!(fields.title.as_deref(), Some("Primary heading"));
        assert_eq!(fields.paragraphs, vec!["The first story paragraph is long enough."]);
        assert_eq!(fields.category.as_deref(), Some("Politics"));
        assert_eq!(fields.author, "Test Source");
        assert_eq!(fields.date, None);
    }

    #[test]
    fn test_title_falls_back_to_later_selector() {
        let doc = Html::parse_document("<h1>Only heading</h1>");
        let fields = RULES.apply(&doc, "Test Source");
        assert_eq!(fields.title.as_deref(), Some("Only heading"));
        assert!(fields.paragraphs.is_empty());
    }

    #[test]
    fn test_date_attribute_precedence() {
        let doc = Html::parse_document(
            r#"<time datetime="2024-05-01T10:00:00Z" content="ignored">1 May</time>"#,
        );
        let fields = RULES.apply(&doc, "s");
        assert_eq!(fields.date.as_deref(), Some("2024-05-01T10:00:00Z"));

        let doc = Html::parse_document(r#"<time content="2024-05-02">2 May</time>"#);
        let fields = RULES.apply(&doc, "s");
        assert_eq!(fields.date.as_deref(), Some("2024-05-02"));

        let doc = Html::parse_document(r#"<time datetime="">  3 May  2024 </time>"#);
        let fields = RULES.apply(&doc, "s");
        assert_eq!(fields.date.as_deref(), Some("3 May 2024"));
    }

    #[test]
    fn test_date_falls_through_to_meta() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="article:published_time" content="2024-06-01T08:00:00+05:30"></head><body><time></time></body></html>"#,
        );
        let fields = RULES.apply(&doc, "s");
        assert_eq!(fields.date.as_deref(), Some("2024-06-01T08:00:00+05:30"));
    }

    #[test]
    fn test_bad_selector_only_unsets_its_field() {
        let doc = Html::parse_document(
            r#"<html><body>
                <h1>Valid heading</h1>
                <div class="story"><p>A paragraph long enough to be kept.</p></div>
                <time datetime="2024-05-01">1 May</time>
                <nav class="crumbs"><a>World</a></nav>
            </body></html>"#,
        );

        let broken_date = Rules {
            date: &["time[[["],
            ..RULES
        };
        let fields = broken_date.apply(&doc, "Broken");
        assert_eq!(fields.title.as_deref(), Some("Valid heading"));
        assert_eq!(fields.paragraphs, vec!["A paragraph long enough to be kept."]);
        assert_eq!(fields.category.as_deref(), Some("World"));
        assert_eq!(fields.date, None);

        let broken_title = Rules {
            title: &["h1[[[", "h1"],
            breadcrumb: Some("nav((("),
            ..RULES
        };
        let fields = broken_title.apply(&doc, "Broken");
        assert_eq!(fields.title.as_deref(), Some("Valid heading"));
        assert_eq!(fields.date.as_deref(), Some("2024-05-01"));
        assert_eq!(fields.category, None);

        let broken_paragraph = Rules {
            paragraph: "p:::",
            ..RULES
        };
        let fields = broken_paragraph.apply(&doc, "Broken");
        assert!(fields.paragraphs.is_empty());
        assert_eq!(fields.title.as_deref(), Some("Valid heading"));
    }

    #[test]
    fn test_fill_from_structured_only_fills_gaps() {
        let doc = Html::parse_document(
            r#"<script type="application/ld+json">{"@type":"NewsArticle","headline":" Meta headline ","datePublished":"2024-01-01"}</script>"#,
        );
        let mut fields = ArticleFields {
            date: Some("kept".to_string()),
            ..Default::default()
        };
        fill_from_structured(&mut fields, &doc);
        assert_eq!(fields.title.as_deref(), Some("Meta headline"));
        assert_eq!(fields.date.as_deref(), Some("kept"));
    }
}
