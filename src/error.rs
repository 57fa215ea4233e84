//! Failure types for extraction and page retrieval.
//!
//! - [`ExtractionFailure`]: The tagged failure an extraction call returns in
//!   place of an [`ArticleRecord`](crate::models::ArticleRecord)
//! - [`FetchError`]: Errors raised while retrieving a page over HTTP

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an extraction produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    /// The URL's domain matches no registered source. Never worth retrying.
    UnsupportedSource,
    /// An adapter hit a condition other than missing markup.
    ExtractionError,
    /// Neither a headline nor any body paragraph could be found.
    NoContent,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::UnsupportedSource => "unsupported-source",
            ReasonCode::ExtractionError => "extraction-error",
            ReasonCode::NoContent => "no-content",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed extraction, carrying a reason code and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{reason_code}: {detail}")]
pub struct ExtractionFailure {
    pub reason_code: ReasonCode,
    pub detail: String,
}

impl ExtractionFailure {
    pub fn unsupported_source(url: &str) -> Self {
        Self {
            reason_code: ReasonCode::UnsupportedSource,
            detail: format!("no registered source matches {url}"),
        }
    }

    pub fn extraction_error(source: &str, detail: impl fmt::Display) -> Self {
        Self {
            reason_code: ReasonCode::ExtractionError,
            detail: format!("{source}: {detail}"),
        }
    }

    pub fn no_content(url: &str) -> Self {
        Self {
            reason_code: ReasonCode::NoContent,
            detail: format!("could not extract a title or any content from {url}"),
        }
    }
}

/// Errors raised while fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Transport errors, throttling and server errors are worth another try;
    /// other client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_serialize_kebab_case() {
        let failure = ExtractionFailure::unsupported_source("https://example.com/a");
        let json = serde_json::to_value(&failure).unwrap();

        assert_eq!(json["reason_code"], "unsupported-source");
        assert_eq!(json["detail"], "no registered source matches https://example.com/a");
        assert_eq!(
            serde_json::to_value(ReasonCode::ExtractionError).unwrap(),
            "extraction-error"
        );
        assert_eq!(serde_json::to_value(ReasonCode::NoContent).unwrap(), "no-content");
    }

    #[test]
    fn test_failure_display() {
        let failure = ExtractionFailure::no_content("https://ddnews.gov.in/x");
        assert_eq!(
            failure.to_string(),
            "no-content: could not extract a title or any content from https://ddnews.gov.in/x"
        );
    }

    #[test]
    fn test_status_retryability() {
        let status = |status| FetchError::Status {
            url: "https://www.bbc.com".to_string(),
            status,
        };
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!status(403).is_retryable());
    }
}
