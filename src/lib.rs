//! # News Extract
//!
//! Turns the HTML of a news article page into a normalized
//! [`ArticleRecord`]: headline, body text, publication date, author,
//! category, and simple content metrics.
//!
//! ## Features
//!
//! - Hand-written extraction rules for BBC News, DD News and Hindustan Times
//! - JSON-LD article metadata as a fallback for headlines and dates
//! - Whitespace and invisible-character cleanup on every extracted fragment
//! - Best-effort records: a missing field becomes a placeholder, and only a
//!   page with neither headline nor body is rejected
//!
//! ## Usage
//!
//! ```
//! use news_extract::{ExtractionEngine, ReasonCode};
//!
//! let engine = ExtractionEngine::default();
//! let html = r#"<h1 id="main-heading">Storm hits coast</h1>"#;
//! let record = engine
//!     .extract_html("https://www.bbc.com/news/weather-68000000", html)
//!     .unwrap();
//! assert_eq!(record.title, "Storm hits coast");
//!
//! let failure = engine.extract_html("https://example.com/a", html).unwrap_err();
//! assert_eq!(failure.reason_code, ReasonCode::UnsupportedSource);
//! ```
//!
//! ## Architecture
//!
//! 1. **Routing**: [`SourceRegistry`] maps the URL's domain to an adapter
//! 2. **Extraction**: the [`scrapers`] adapter applies its selector chains
//! 3. **Assembly**: fields are normalized and placeholders substituted
//! 4. **Validation**: records with neither headline nor body are rejected
//!
//! Fetching ([`fetch`]), configuration ([`config`]) and file output
//! ([`outputs`]) support the `news_extract` binary and are not needed to use
//! the engine. The library logs through `tracing` and never installs a
//! subscriber itself.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod outputs;
pub mod registry;
pub mod scrapers;
pub mod structured;
pub mod utils;

pub use engine::ExtractionEngine;
pub use error::{ExtractionFailure, FetchError, ReasonCode};
pub use models::{ArticleFields, ArticleRecord};
pub use registry::SourceRegistry;
pub use scrapers::SourceAdapter;
