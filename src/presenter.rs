//! Assembly of translated items and the HTML dashboard.
//!
//! Translation failures reach this module as [`TranslationError`] values and
//! are turned into placeholder text here, so every [`TranslatedItem`] carries
//! all six fields.

use crate::error::{Error, Result, TranslationError};
use askama::Template;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Marker that starts every failure placeholder
pub const FAILURE_MARKER: &str = "번역 실패";

/// A feed entry after sanitizing, translating and date formatting
///
/// Produced by the pipeline; translation outcomes are still explicit results.
#[derive(Debug, Clone)]
pub struct ProcessedEntry {
    /// Sanitized original title
    pub title: String,
    /// Outcome of translating the title
    pub translated_title: std::result::Result<String, TranslationError>,
    /// Formatted publication date (or the raw date string)
    pub date: String,
    /// Sanitized original summary (empty when the entry has none)
    pub summary: String,
    /// Outcome of translating the summary
    pub translated_summary: std::result::Result<String, TranslationError>,
    /// Article link
    pub link: String,
}

/// One row of the dashboard and of the CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslatedItem {
    /// Original (sanitized) title
    pub original_title: String,
    /// Translated title, or a placeholder
    pub translated_title: String,
    /// Formatted publication date
    pub date: String,
    /// Original (sanitized) summary
    pub original_summary: String,
    /// Translated summary, or a placeholder
    pub translated_summary: String,
    /// Article link
    pub link: String,
}

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsDigest {
    /// Feed the items came from
    pub source_url: String,
    /// When the run finished
    #[schema(value_type = String)]
    pub generated_at: DateTime<Utc>,
    /// Items in feed order
    pub items: Vec<TranslatedItem>,
    /// User-facing messages for recovered translation failures
    pub warnings: Vec<String>,
}

/// Turns processed entries into display rows
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    placeholder_prefix_chars: usize,
}

impl Presenter {
    /// Create a presenter quoting `placeholder_prefix_chars` characters of failed text
    pub fn new(placeholder_prefix_chars: usize) -> Self {
        Self {
            placeholder_prefix_chars,
        }
    }

    /// Build the display row for `entry`.
    ///
    /// A failed translation becomes a placeholder and adds one warning message.
    pub fn present(&self, entry: ProcessedEntry, warnings: &mut Vec<String>) -> TranslatedItem {
        let translated_title =
            self.resolve(&entry.title, entry.translated_title, warnings);
        let translated_summary =
            self.resolve(&entry.summary, entry.translated_summary, warnings);

        TranslatedItem {
            original_title: entry.title,
            translated_title,
            date: entry.date,
            original_summary: entry.summary,
            translated_summary,
            link: entry.link,
        }
    }

    fn resolve(
        &self,
        source: &str,
        outcome: std::result::Result<String, TranslationError>,
        warnings: &mut Vec<String>,
    ) -> String {
        match outcome {
            Ok(text) => text,
            Err(e) => {
                warnings.push(format!("번역 오류: {}", e));
                placeholder(source, self.placeholder_prefix_chars)
            }
        }
    }
}

/// Placeholder for text that could not be translated:
/// the failure marker followed by the first `prefix_chars` characters of `source`.
pub fn placeholder(source: &str, prefix_chars: usize) -> String {
    let prefix: String = source.chars().take(prefix_chars).collect();
    format!("{}: {}...", FAILURE_MARKER, prefix)
}

/// Only http(s) links are rendered as anchors
fn is_web_link(link: &str) -> bool {
    url::Url::parse(link)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

struct ItemView<'a> {
    index: usize,
    item: &'a TranslatedItem,
    web_link: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    items: Vec<ItemView<'a>>,
    warnings: &'a [String],
    source_url: &'a str,
    generated_at: String,
    csv_href: String,
    file_name: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    message: &'a str,
}

/// Render the dashboard for `digest`, embedding `csv` as the download
pub fn render_dashboard(digest: &NewsDigest, csv: &[u8], file_name: &str) -> Result<String> {
    let items = digest
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| ItemView {
            index: i + 1,
            item,
            web_link: is_web_link(&item.link),
        })
        .collect();

    let page = DashboardPage {
        items,
        warnings: &digest.warnings,
        source_url: &digest.source_url,
        generated_at: digest.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        csv_href: format!("data:text/csv;charset=utf-8;base64,{}", BASE64.encode(csv)),
        file_name,
    };

    Ok(page.render()?)
}

/// Render the page shown when a run fails as a whole
pub fn render_error(error: &Error) -> Result<String> {
    let message = error.to_string();
    Ok(ErrorPage { message: &message }.render()?)
}
