//! Data models for extracted articles.
//!
//! This module defines the two shapes an article takes on its way through the
//! extraction pipeline:
//! - [`ArticleFields`]: Raw per-field results produced by a source adapter,
//!   where any field an adapter could not locate is left unset
//! - [`ArticleRecord`]: The normalized, placeholder-filled record handed back
//!   to callers
//!
//! Records built by [`ArticleRecord::assemble`] have content metrics that agree
//! with the paragraphs making up `content`. Deserialized records are taken as
//! they are.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};

/// Substituted when no rule could locate a headline.
pub const TITLE_NOT_FOUND: &str = "Title not found";
/// Substituted when no paragraph survived the body rules.
pub const CONTENT_NOT_FOUND: &str = "Content not found";
/// Substituted when no rule could locate a publication date.
pub const DATE_NOT_FOUND: &str = "Date not found";
/// Category used when neither breadcrumbs nor the URL yield one.
pub const DEFAULT_CATEGORY: &str = "News";
/// Separator placed between paragraphs in `content`.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Field values located by a source adapter.
///
/// `None` (or an empty paragraph list) means the corresponding rule chain
/// found nothing. Adapters never fail for missing markup; they leave the
/// field unset instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: Option<String>,
    /// Retained body paragraphs, in document order.
    pub paragraphs: Vec<String>,
    pub date: Option<String>,
    /// The source's canonical name.
    pub author: String,
    pub category: Option<String>,
}

/// A successfully extracted article.
///
/// Build records with [`ArticleRecord::assemble`]: only then are
/// `word_count` and `paragraph_count` guaranteed to match `content`. A record
/// deserialized from JSON or built field by field carries whatever counts it
/// was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The headline, or [`TITLE_NOT_FOUND`].
    pub title: String,
    /// Paragraphs joined by a blank line, or [`CONTENT_NOT_FOUND`].
    pub content: String,
    /// Publication date as exposed by the source, or [`DATE_NOT_FOUND`].
    pub date: String,
    pub author: String,
    pub category: String,
    /// The requested URL, echoed verbatim.
    pub url: String,
    /// Whitespace-delimited tokens across all retained paragraphs.
    pub word_count: usize,
    /// Number of retained paragraphs.
    pub paragraph_count: usize,
}

impl ArticleRecord {
    /// Build a record from adapter output.
    ///
    /// Every textual field is normalized, empty paragraphs are dropped, and
    /// unset fields are replaced by their placeholders. `word_count` and
    /// `paragraph_count` are derived from the surviving paragraphs.
    pub fn assemble(fields: ArticleFields, url: &str) -> Self {
        let paragraphs: Vec<String> = fields
            .paragraphs
            .iter()
            .map(|p| normalize(p))
            .filter(|p| !p.is_empty())
            .collect();

        let word_count = paragraphs
            .iter()
            .map(|p| p.split_whitespace().count())
            .sum();
        let paragraph_count = paragraphs.len();

        let content = if paragraphs.is_empty() {
            CONTENT_NOT_FOUND.to_string()
        } else {
            paragraphs.join(PARAGRAPH_SEPARATOR)
        };

        let author = normalize(&fields.author);

        Self {
            title: present(fields.title).unwrap_or_else(|| TITLE_NOT_FOUND.to_string()),
            content,
            date: present(fields.date).unwrap_or_else(|| DATE_NOT_FOUND.to_string()),
            author,
            category: present(fields.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            url: url.to_string(),
            word_count,
            paragraph_count,
        }
    }

    /// True when the headline is a real value rather than the placeholder.
    pub fn has_title(&self) -> bool {
        self.title != TITLE_NOT_FOUND
    }

    /// True when at least one paragraph was retained.
    pub fn has_content(&self) -> bool {
        self.paragraph_count > 0
    }

    /// Iterate the paragraphs that make up `content`.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        let content = if self.has_content() { self.content.as_str() } else { "" };
        content.split(PARAGRAPH_SEPARATOR).filter(|p| !p.is_empty())
    }
}

/// Normalize an optional field, treating an empty result as unset.
fn present(value: Option<String>) -> Option<String> {
    value.map(|v| normalize(&v)).filter(|v| !v.is_empty())
}
