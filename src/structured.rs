//! Embedded JSON-LD article metadata.
//!
//! Many article pages describe themselves in a
//! `<script type="application/ld+json">` block. Adapters consult this as a
//! fallback when their layout selectors come up empty.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

static LD_JSON: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("static JSON-LD selector is valid")
});

/// `@type` values accepted as article metadata.
const ARTICLE_TYPES: [&str; 2] = ["NewsArticle", "Article"];

/// Return the first JSON-LD object on the page typed as an article.
///
/// Blocks are visited in document order. Blocks that fail to parse are
/// skipped. When a block holds a list, only its first element is considered.
#[instrument(level = "debug", skip_all)]
pub fn extract_structured(document: &Html) -> Option<Map<String, Value>> {
    for (index, script) in document.select(&LD_JSON).enumerate() {
        let raw = script.text().collect::<String>();
        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                debug!(index, error = %e, "Skipping malformed JSON-LD block");
                continue;
            }
        };

        let candidate = match value {
            Value::Array(items) => items.into_iter().next(),
            other => Some(other),
        };

        if let Some(Value::Object(object)) = candidate {
            let is_article = object
                .get("@type")
                .and_then(Value::as_str)
                .is_some_and(|t| ARTICLE_TYPES.contains(&t));
            if is_article {
                debug!(index, "Found article JSON-LD block");
                return Some(object);
            }
        }
    }
    None
}

/// Read the first non-empty string among `keys` from a metadata object.
pub fn string_field(metadata: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| metadata.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// The article headline from a metadata object.
pub fn headline(metadata: &Map<String, Value>) -> Option<String> {
    string_field(metadata, &["headline", "name"])
}

/// The publication date from a metadata object.
pub fn date_published(metadata: &Map<String, Value>) -> Option<String> {
    string_field(metadata, &["datePublished", "dateCreated"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(blocks: &[&str]) -> Html {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        Html::parse_document(&format!("<html><head>{scripts}</head><body></body></html>"))
    }

    #[test]
    fn test_finds_news_article() {
        let doc = page(&[r#"{"@type": "NewsArticle", "headline": "Storm hits coast"}"#]);
        let meta = extract_structured(&doc).unwrap();
        assert_eq!(headline(&meta).as_deref(), Some("Storm hits coast"));
    }

    #[test]
    fn test_skips_malformed_and_non_article_blocks() {
        let doc = page(&[
            "{not json",
            r#"{"@type": "BreadcrumbList", "name": "crumbs"}"#,
            r#"{"@type": "Article", "headline": "Second", "datePublished": "2024-03-01"}"#,
            r#"{"@type": "NewsArticle", "headline": "Third"}"#,
        ]);
        let meta = extract_structured(&doc).unwrap();
        assert_eq!(headline(&meta).as_deref(), Some("Second"));
        assert_eq!(date_published(&meta).as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_list_uses_first_element_only() {
        let doc = page(&[
            r#"[{"@type": "WebPage"}, {"@type": "NewsArticle", "headline": "Hidden"}]"#,
            r#"[{"@type": "NewsArticle", "headline": "Listed"}]"#,
        ]);
        let meta = extract_structured(&doc).unwrap();
        assert_eq!(headline(&meta).as_deref(), Some("Listed"));
    }

    #[test]
    fn test_none_when_nothing_matches() {
        assert!(extract_structured(&page(&[])).is_none());
        assert!(extract_structured(&page(&["[]", "42", r#"{"@type": "Person"}"#])).is_none());
    }

    #[test]
    fn test_string_field_falls_through_keys() {
        let doc = page(&[r#"{"@type": "Article", "headline": "  ", "name": "Named"}"#]);
        let meta = extract_structured(&doc).unwrap();
        assert_eq!(headline(&meta).as_deref(), Some("Named"));
        assert_eq!(date_published(&meta), None);
    }
}
