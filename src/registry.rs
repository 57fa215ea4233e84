//! Routing from article URLs to source adapters.

use crate::error::ExtractionFailure;
use crate::scrapers::SourceAdapter;
use crate::scrapers::bbcnews::BbcNews;
use crate::scrapers::ddnews::DdNews;
use crate::scrapers::hindustantimes::HindustanTimes;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// An ordered allow-list of domains, each bound to the adapter that handles it.
///
/// Lookups match a domain as a case-insensitive substring of the URL's host
/// and the first matching entry wins. The registry is immutable once built,
/// so shared read-only use needs no synchronization.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    entries: Vec<(String, Arc<dyn SourceAdapter>)>,
}

impl SourceRegistry {
    /// An empty registry; every URL resolves as unsupported.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in sources, in matching order.
    pub fn builtin() -> Self {
        let bbc: Arc<dyn SourceAdapter> = Arc::new(BbcNews);
        Self::empty()
            .with_source("bbc.com", Arc::clone(&bbc))
            .with_source("bbc.co.uk", bbc)
            .with_source("ddnews.gov.in", Arc::new(DdNews))
            .with_source("hindustantimes.com", Arc::new(HindustanTimes))
    }

    /// Append a domain entry. Entries added later only match URLs that no
    /// earlier entry claimed.
    pub fn with_source(mut self, domain: &str, adapter: Arc<dyn SourceAdapter>) -> Self {
        self.entries.push((domain.to_lowercase(), adapter));
        self
    }

    /// Find the adapter responsible for `url`.
    pub fn resolve(&self, url: &str) -> Result<&dyn SourceAdapter, ExtractionFailure> {
        let haystack = match_target(url);
        match self
            .entries
            .iter()
            .find(|(domain, _)| haystack.contains(domain.as_str()))
        {
            Some((domain, adapter)) => {
                debug!(%url, %domain, source = adapter.name(), "Resolved source");
                Ok(adapter.as_ref())
            }
            None => {
                debug!(%url, "No source matches URL");
                Err(ExtractionFailure::unsupported_source(url))
            }
        }
    }

    /// Whether any registered source handles `url`.
    pub fn is_supported(&self, url: &str) -> bool {
        self.resolve(url).is_ok()
    }

    /// Registered domains, in matching order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(domain, _)| domain.as_str())
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(domain, adapter)| (domain, adapter.name())))
            .finish()
    }
}

/// The lower-cased host of `url`, or the whole lower-cased string when it has
/// no parseable host.
fn match_target(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_else(|| url.to_lowercase())
}
