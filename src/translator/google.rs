//! Google Translate web endpoint backend

use super::TranslationBackend;
use crate::config::TranslationConfig;
use crate::error::{Error, Result, TranslationError};
use async_trait::async_trait;
use tracing::debug;

/// Longest input the endpoint accepts in one request, in characters
pub const MAX_REQUEST_CHARS: usize = 5000;

/// Backend for Google's public `translate_a/single` endpoint
///
/// The text goes in a form-encoded POST body so long inputs do not hit URL
/// length limits. The answer is a nested JSON array whose first element lists
/// translated sentence segments; the segments are concatenated.
#[derive(Clone, Debug)]
pub struct GoogleTranslateBackend {
    http_client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateBackend {
    /// Create a backend talking to `config.endpoint`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("news-translate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> std::result::Result<String, TranslationError> {
        let len = text.chars().count();
        if len > MAX_REQUEST_CHARS {
            return Err(TranslationError::InputTooLong {
                len,
                max: MAX_REQUEST_CHARS,
            });
        }

        debug!(chars = len, source, target, "Requesting translation");

        let response = self
            .http_client
            .post(&self.endpoint)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        extract_translation(&body)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// Concatenate the translated segments of a `translate_a/single` answer.
///
/// Shape: `[[["<translated>", "<source>", ...], ...], ...]`.
fn extract_translation(body: &serde_json::Value) -> std::result::Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationError::MalformedResponse("missing segment list".into()))?;

    let mut translated = String::new();
    for segment in segments {
        // Trailing transliteration segments carry null in the first slot
        if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
            translated.push_str(part);
        }
    }

    if translated.is_empty() {
        return Err(TranslationError::MalformedResponse(
            "response contained no translated text".into(),
        ));
    }

    Ok(translated)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> GoogleTranslateBackend {
        let config = TranslationConfig {
            endpoint: format!("{}/translate_a/single", server.uri()),
            ..Default::default()
        };
        GoogleTranslateBackend::new(&config).unwrap()
    }

    #[test]
    fn extracts_and_joins_segments() {
        let body = json!([
            [
                ["안녕하세요. ", "Hello. ", null, null, 10],
                ["세계", "World", null, null, 10],
                [null, null, "annyeonghaseyo"]
            ],
            null,
            "en"
        ]);
        assert_eq!(extract_translation(&body).unwrap(), "안녕하세요. 세계");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(matches!(
            extract_translation(&json!({"text": "x"})),
            Err(TranslationError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_translation(&json!([null, null, "en"])),
            Err(TranslationError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_translation(&json!([[]])),
            Err(TranslationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn sends_language_pair_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "ko"))
            .and(query_param("dt", "t"))
            .and(body_string_contains("q=Hello+world"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([[["안녕 세계", "Hello world", null, null, 1]]])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let out = backend.translate("Hello world", "en", "ko").await.unwrap();
        assert_eq!(out, "안녕 세계");
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.translate("Hello", "en", "ko").await.unwrap_err();
        assert_eq!(err, TranslationError::Status { status: 429 });
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.translate("Hello", "en", "ko").await.unwrap_err();
        assert!(matches!(err, TranslationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn oversized_input_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let text = "a".repeat(MAX_REQUEST_CHARS + 1);
        let err = backend.translate(&text, "en", "ko").await.unwrap_err();
        assert_eq!(
            err,
            TranslationError::InputTooLong {
                len: MAX_REQUEST_CHARS + 1,
                max: MAX_REQUEST_CHARS
            }
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_request_error() {
        let config = TranslationConfig {
            endpoint: "http://127.0.0.1:1/translate_a/single".into(),
            ..Default::default()
        };
        let backend = GoogleTranslateBackend::new(&config).unwrap();
        let err = backend.translate("Hello", "en", "ko").await.unwrap_err();
        assert!(matches!(err, TranslationError::Request(_)));
    }
}
