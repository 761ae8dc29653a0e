//! Error types for news-translate
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Feed, Config) and per-field translation failures
//! - HTTP status code mapping for the dashboard and API
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for news-translate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for news-translate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "feed.url")
        key: Option<String>,
    },

    /// Feed retrieval or parsing failed
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dashboard template rendering failed
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Feed retrieval errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed server answered with a non-success status
    #[error("feed returned HTTP {status}: {url}")]
    Http {
        /// HTTP status code returned by the feed server
        status: u16,
        /// The feed URL that was requested
        url: String,
    },

    /// The body could be parsed neither as RSS nor as Atom
    #[error("failed to parse feed as RSS or Atom. RSS error: {rss}. Atom error: {atom}")]
    Parse {
        /// Error reported by the RSS parser
        rss: String,
        /// Error reported by the Atom parser
        atom: String,
    },
}

/// Translation service errors
///
/// The translator returns these instead of swallowing failures; the presenter
/// decides which placeholder text replaces a failed field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// The request could not be sent or the body could not be read
    #[error("translation request failed: {0}")]
    Request(String),

    /// The translation service answered with a non-success status
    #[error("translation service returned HTTP {status}")]
    Status {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// The response body did not have the expected shape
    #[error("malformed translation response: {0}")]
    MalformedResponse(String),

    /// A single request exceeded the service's accepted input length
    #[error("input of {len} characters exceeds the limit of {max}")]
    InputTooLong {
        /// Length of the rejected input, in characters
        len: usize,
        /// Maximum accepted length, in characters
        max: usize,
    },
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "feed_error",
///     "message": "feed error: feed returned HTTP 503: https://techcrunch.com/feed/",
///     "details": {
///       "status": 503
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "feed_error", "config_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            Error::Config { .. } => 400,

            // 502 Bad Gateway - an upstream service misbehaved
            Error::Feed(_) | Error::Network(_) => 502,

            Error::Io(_)
            | Error::Csv(_)
            | Error::Template(_)
            | Error::ApiServerError(_)
            | Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Feed(_) => "feed_error",
            Error::Network(_) => "network_error",
            Error::Io(_) => "io_error",
            Error::Csv(_) => "csv_error",
            Error::Template(_) => "template_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::Feed(FeedError::Http { status, url }) => Some(serde_json::json!({
                "status": status,
                "url": url,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
