//! One pass of fetch → sanitize → translate → format → present.
//!
//! Entries are handled strictly one after another, in feed order. Only a
//! failing feed aborts the run; translation and date problems are recovered
//! per field.

use crate::config::Config;
use crate::dates::format_date;
use crate::error::Result;
use crate::feed::{FeedEntry, FeedFetcher};
use crate::presenter::{NewsDigest, Presenter, ProcessedEntry};
use crate::sanitize::strip_tags;
use crate::translator::{GoogleTranslateBackend, TranslationBackend, Translator};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Date shown for entries that carry neither a published nor an updated time
pub const MISSING_DATE: &str = "No date";

/// Runs the whole fetch-and-translate pass
pub struct NewsPipeline {
    fetcher: FeedFetcher,
    translator: Translator,
    presenter: Presenter,
    max_entries: usize,
}

impl NewsPipeline {
    /// Build a pipeline that translates through Google's web endpoint
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or an HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let backend = GoogleTranslateBackend::new(&config.translation)?;
        Self::with_backend(config, Arc::new(backend))
    }

    /// Build a pipeline that sends every translation request to `backend`
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn with_backend(config: &Config, backend: Arc<dyn TranslationBackend>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            fetcher: FeedFetcher::new(&config.feed)?,
            translator: Translator::new(backend, &config.translation),
            presenter: Presenter::new(config.translation.placeholder_prefix_chars),
            max_entries: config.feed.max_entries,
        })
    }

    /// The feed URL this pipeline reads
    pub fn source_url(&self) -> &str {
        self.fetcher.url()
    }

    /// Fetch the feed and translate its first `max_entries` entries.
    ///
    /// # Errors
    /// Returns error only if the feed cannot be retrieved or parsed; no partial
    /// digest is produced in that case.
    pub async fn run(&self) -> Result<NewsDigest> {
        let entries = self.fetcher.fetch().await.inspect_err(|e| {
            error!(url = %self.fetcher.url(), error = %e, "Feed retrieval failed");
        })?;

        let total = entries.len().min(self.max_entries);
        info!(
            url = %self.fetcher.url(),
            available = entries.len(),
            processing = total,
            "Feed loaded"
        );

        let mut items = Vec::with_capacity(total);
        let mut warnings = Vec::new();

        for (index, entry) in entries.into_iter().take(self.max_entries).enumerate() {
            info!("Processing article {}/{}", index + 1, total);
            let processed = self.process_entry(entry).await;
            items.push(self.presenter.present(processed, &mut warnings));
        }

        if !warnings.is_empty() {
            warn!(
                failures = warnings.len(),
                "Some fields could not be translated and were replaced by placeholders"
            );
        }

        Ok(NewsDigest {
            source_url: self.fetcher.url().to_string(),
            generated_at: Utc::now(),
            items,
            warnings,
        })
    }

    async fn process_entry(&self, entry: FeedEntry) -> ProcessedEntry {
        let title = strip_tags(&entry.title);
        let translated_title = self.translator.translate(&title).await;
        if let Err(e) = &translated_title {
            warn!(title = %title, error = %e, "Title translation failed");
        }

        let summary = entry
            .summary
            .as_deref()
            .map(strip_tags)
            .unwrap_or_default();
        let translated_summary = self.translator.translate(&summary).await;
        if let Err(e) = &translated_summary {
            warn!(title = %title, error = %e, "Summary translation failed");
        }

        let date = format_date(entry.published.as_deref().unwrap_or(MISSING_DATE));

        ProcessedEntry {
            title,
            translated_title,
            date,
            summary,
            translated_summary,
            link: entry.link,
        }
    }
}
