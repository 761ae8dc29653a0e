//! Configuration types for news-translate

use crate::error::{Error, Result};
use crate::translator::MAX_REQUEST_CHARS;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};
use utoipa::ToSchema;

/// Top-level configuration
///
/// Every field has a default, so an empty TOML file (or `Config::default()`)
/// reproduces the stock TechCrunch → Korean dashboard.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Feed source settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// CSV export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        toml::from_str(content).map_err(|e| Error::Config {
            message: format!("failed to parse TOML: {}", e),
            key: None,
        })
    }

    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.feed.url).map_err(|msg| Error::config("feed.url", msg))?;

        if self.feed.max_entries == 0 {
            return Err(Error::config("feed.max_entries", "must be at least 1"));
        }

        validate_http_url(&self.translation.endpoint)
            .map_err(|msg| Error::config("translation.endpoint", msg))?;

        if self.translation.max_chunk_chars == 0 {
            return Err(Error::config(
                "translation.max_chunk_chars",
                "must be at least 1",
            ));
        }

        if self.translation.max_chunk_chars > MAX_REQUEST_CHARS {
            return Err(Error::config(
                "translation.max_chunk_chars",
                format!(
                    "must not exceed {} (the translation service's request limit)",
                    MAX_REQUEST_CHARS
                ),
            ));
        }

        if self.translation.source_language.trim().is_empty() {
            return Err(Error::config(
                "translation.source_language",
                "must not be empty",
            ));
        }

        if self.translation.target_language.trim().is_empty() {
            return Err(Error::config(
                "translation.target_language",
                "must not be empty",
            ));
        }

        if self.export.file_name.trim().is_empty() {
            return Err(Error::config("export.file_name", "must not be empty"));
        }

        // Quoted verbatim in the Content-Disposition header
        if self
            .export
            .file_name
            .chars()
            .any(|c| c == '"' || c == '\\' || c.is_control())
        {
            return Err(Error::config(
                "export.file_name",
                "must not contain quotes, backslashes or control characters",
            ));
        }

        Ok(())
    }
}

fn validate_http_url(raw: &str) -> std::result::Result<(), String> {
    if raw.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    let parsed = url::Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported URL scheme '{}'", other)),
    }

    if parsed.host_str().is_none() {
        return Err(format!("URL '{}' has no host", raw));
    }

    Ok(())
}

/// Feed source configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedConfig {
    /// Feed URL (default: "https://techcrunch.com/feed/")
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Number of entries processed per run, in feed order (default: 10)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// HTTP timeout for the feed request in seconds (default: 30)
    #[serde(default = "default_http_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub timeout: Duration,

    /// User-Agent header sent with the feed request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            max_entries: default_max_entries(),
            timeout: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Translation service configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslationConfig {
    /// Translation endpoint (default: Google's public web endpoint)
    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,

    /// Source language code (default: "en")
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (default: "ko")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Longest text sent in a single request, in characters (default: 4500)
    ///
    /// Longer text is split into consecutive chunks of this size.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// How many characters of the source text a failure placeholder quotes (default: 100)
    #[serde(default = "default_placeholder_prefix_chars")]
    pub placeholder_prefix_chars: usize,

    /// HTTP timeout for each translation request in seconds (default: 30)
    #[serde(default = "default_http_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub timeout: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translate_endpoint(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            max_chunk_chars: default_max_chunk_chars(),
            placeholder_prefix_chars: default_placeholder_prefix_chars(),
            timeout: default_http_timeout(),
        }
    }
}

/// CSV export configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportConfig {
    /// File name offered for the CSV download (default: "techcrunch_translated_news.csv")
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

/// Server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// HTTP API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// HTTP API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:8501)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_feed_url() -> String {
    "https://techcrunch.com/feed/".to_string()
}

fn default_max_entries() -> usize {
    10
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("news-translate/{}", env!("CARGO_PKG_VERSION"))
}

fn default_translate_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ko".to_string()
}

fn default_max_chunk_chars() -> usize {
    4500
}

fn default_placeholder_prefix_chars() -> usize {
    100
}

fn default_export_file_name() -> String {
    "techcrunch_translated_news.csv".to_string()
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
