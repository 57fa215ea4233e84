//! JSON output for extracted articles.
//!
//! Each record is written to `{json_output_dir}/{slug}.json`, where the slug
//! comes from the headline. Records without a headline fall back to the last
//! segment of their URL.

use crate::models::ArticleRecord;
use crate::utils::slugify_title;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};
use url::Url;

/// Longest slug used for a file name, in characters.
const MAX_SLUG_CHARS: usize = 80;

/// Write an [`ArticleRecord`] as pretty-printed JSON.
///
/// Returns the path of the written file.
#[instrument(
    level = "info",
    skip_all,
    fields(json_output_dir = %json_output_dir, url = %record.url)
)]
pub async fn write_record(
    record: &ArticleRecord,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(record)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(format!("{}.json", file_stem(record)));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote article JSON");
    Ok(path)
}

fn file_stem(record: &ArticleRecord) -> String {
    let from_title = if record.has_title() {
        slugify_title(&record.title)
    } else {
        String::new()
    };
    let slug = if from_title.trim_matches('-').is_empty() {
        url_slug(&record.url)
    } else {
        from_title
    };
    let slug: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "article".to_string()
    } else {
        slug.to_string()
    }
}

fn url_slug(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut s| s.rfind(|seg| !seg.is_empty()).map(str::to_string))
        })
        .map(|seg| slugify_title(seg.trim_end_matches(".html")))
        .unwrap_or_default()
}
