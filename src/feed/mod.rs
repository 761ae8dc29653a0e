//! Feed retrieval and parsing.
//!
//! Fetches one syndication feed over HTTP and turns it into [`FeedEntry`]
//! records. RSS 2.0 is tried first; Atom is the fallback.

use crate::config::FeedConfig;
use crate::error::{Error, FeedError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One article record from a feed, as published
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Entry title (raw, may contain markup)
    pub title: String,

    /// Description or summary (raw, may contain markup)
    pub summary: Option<String>,

    /// Publication timestamp as written in the feed (falls back to the update time)
    pub published: Option<String>,

    /// Link to the article
    pub link: String,
}

/// Fetches the configured feed
pub struct FeedFetcher {
    /// HTTP client for fetching the feed
    http_client: reqwest::Client,

    /// Feed URL
    url: String,
}

impl FeedFetcher {
    /// Create a fetcher for `config.url`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: config.url.clone(),
        })
    }

    /// The feed URL this fetcher reads
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the feed
    ///
    /// Entries are returned in feed order.
    ///
    /// # Errors
    /// Returns error if:
    /// - HTTP request fails or times out
    /// - The server answers with a non-success status
    /// - The body cannot be parsed as either RSS or Atom
    pub async fn fetch(&self) -> Result<Vec<FeedEntry>> {
        debug!(url = %self.url, "Fetching feed");

        let response = self.http_client.get(&self.url).send().await?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            }
            .into());
        }

        let content = response.text().await?;
        let entries = parse_feed(&content)?;
        debug!(url = %self.url, entries = entries.len(), "Feed fetched");
        Ok(entries)
    }
}

/// Parse feed content, trying RSS first and then Atom
pub fn parse_feed(content: &str) -> Result<Vec<FeedEntry>> {
    match parse_as_rss(content) {
        Ok(entries) => {
            debug!("Parsed as RSS, found {} entries", entries.len());
            Ok(entries)
        }
        Err(rss_err) => {
            debug!("Failed to parse as RSS: {}, trying Atom", rss_err);
            match parse_as_atom(content) {
                Ok(entries) => {
                    debug!("Parsed as Atom, found {} entries", entries.len());
                    Ok(entries)
                }
                Err(atom_err) => Err(FeedError::Parse {
                    rss: rss_err,
                    atom: atom_err,
                }
                .into()),
            }
        }
    }
}

fn parse_as_rss(content: &str) -> std::result::Result<Vec<FeedEntry>, String> {
    let channel = content
        .parse::<rss::Channel>()
        .map_err(|e| e.to_string())?;

    let entries = channel
        .items()
        .iter()
        .map(|item| {
            // pubDate, else Dublin Core date
            let published = item.pub_date().map(str::to_string).or_else(|| {
                item.dublin_core_ext()
                    .and_then(|dc| dc.dates().first().cloned())
            });

            // Permalink GUIDs stand in for a missing link
            let link = item
                .link()
                .map(str::to_string)
                .or_else(|| {
                    item.guid()
                        .filter(|g| g.is_permalink())
                        .map(|g| g.value().to_string())
                })
                .unwrap_or_default();

            FeedEntry {
                title: item.title().unwrap_or("").to_string(),
                summary: item.description().map(str::to_string),
                published,
                link,
            }
        })
        .collect();

    Ok(entries)
}

fn parse_as_atom(content: &str) -> std::result::Result<Vec<FeedEntry>, String> {
    let feed = atom_syndication::Feed::read_from(content.as_bytes()).map_err(|e| e.to_string())?;

    let entries = feed
        .entries()
        .iter()
        .map(|entry| {
            // Prefer published, fall back to updated; rendered like an RSS pubDate
            let published = entry
                .published()
                .unwrap_or_else(|| entry.updated())
                .to_rfc2822();

            // Prefer the alternate link, then whatever comes first
            let link = entry
                .links()
                .iter()
                .find(|link| link.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|link| link.href().to_string())
                .unwrap_or_default();

            // Summary, else content
            let summary = entry.summary().map(|s| s.as_str().to_string()).or_else(|| {
                entry
                    .content()
                    .and_then(|c| c.value().map(|v| v.to_string()))
            });

            FeedEntry {
                title: entry.title().as_str().to_string(),
                summary,
                published: Some(published),
                link,
            }
        })
        .collect();

    Ok(entries)
}
