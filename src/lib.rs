//! # news-translate
//!
//! Fetches a news feed, translates each entry's title and summary from English
//! to Korean, and serves the result as a browser dashboard with a CSV export.
//!
//! One run is a straight pipeline:
//!
//! 1. [`feed`] retrieves and parses the feed (RSS 2.0, Atom fallback)
//! 2. [`sanitize`] strips markup from titles and summaries
//! 3. [`translator`] translates, chunking oversized text
//! 4. [`dates`] formats publication timestamps
//! 5. [`presenter`] assembles rows and substitutes placeholders for failures
//! 6. [`export`] serializes the rows as CSV
//!
//! ## Quick Start
//!
//! ```no_run
//! use news_translate::{Config, NewsPipeline, export};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let pipeline = NewsPipeline::new(&config)?;
//!
//!     let digest = pipeline.run().await?;
//!     for item in &digest.items {
//!         println!("{} -> {}", item.original_title, item.translated_title);
//!     }
//!
//!     let csv = export::to_csv_bytes(&digest.items)?;
//!     std::fs::write(&config.export.file_name, csv)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP server (dashboard, CSV download, JSON API)
pub mod api;
/// Configuration types
pub mod config;
/// Publication date formatting
pub mod dates;
/// Error types
pub mod error;
/// CSV export
pub mod export;
/// Feed retrieval and parsing
pub mod feed;
/// End-to-end fetch and translate pass
pub mod pipeline;
/// Row assembly and HTML rendering
pub mod presenter;
/// Markup stripping
pub mod sanitize;
/// Machine translation
pub mod translator;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, Error, ErrorDetail, FeedError, Result, ToHttpStatus, TranslationError};
pub use feed::{FeedEntry, FeedFetcher};
pub use pipeline::NewsPipeline;
pub use presenter::{NewsDigest, TranslatedItem};
pub use translator::{GoogleTranslateBackend, TranslationBackend, Translator};

/// Resolves on Ctrl+C (SIGINT) or, on unix, SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires, so
/// the other one still stops the server. Pass this to
/// [`api::start_api_server`].
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = interrupt => tracing::info!("Interrupted, stopping dashboard server"),
        () = terminate() => tracing::info!("Terminated, stopping dashboard server"),
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
