//! Machine translation of feed text.
//!
//! [`Translator`] owns the policy (skip blank input, split oversized input into
//! fixed-size chunks, join the translated chunks with a space) and delegates
//! each request to a [`TranslationBackend`]. Failures are returned as
//! [`TranslationError`] values; substituting placeholder text is left to the
//! presenter.

use crate::config::TranslationConfig;
use crate::error::TranslationError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

mod google;

pub use google::{GoogleTranslateBackend, MAX_REQUEST_CHARS};

/// A translation service reachable with one request per text
///
/// Implementations are stateless from the caller's point of view: the same
/// handle is shared by every request of a run.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` from `source` to `target` language
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached, rejects the request,
    /// or answers with something that is not a translation.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Translates text between one fixed language pair
#[derive(Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
    source_language: String,
    target_language: String,
    max_chunk_chars: usize,
}

impl Translator {
    /// Create a translator using `backend` for every request
    pub fn new(backend: Arc<dyn TranslationBackend>, config: &TranslationConfig) -> Self {
        Self {
            backend,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            max_chunk_chars: config.max_chunk_chars,
        }
    }

    /// Source language code
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Target language code
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate `text`.
    ///
    /// - Empty or whitespace-only input yields `""` without calling the backend.
    /// - Input up to `max_chunk_chars` characters is sent in one request.
    /// - Longer input is cut every `max_chunk_chars` characters; each chunk that
    ///   is not blank is translated in order and the results are joined with a
    ///   single space. Cuts may fall mid-word.
    ///
    /// # Errors
    ///
    /// The first failing request fails the whole text; chunks translated before
    /// it are discarded.
    pub async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let len = text.chars().count();
        if len <= self.max_chunk_chars {
            return self.request(text).await;
        }

        let chunks = split_into_chunks(text, self.max_chunk_chars);
        debug!(
            backend = self.backend.name(),
            chars = len,
            chunks = chunks.len(),
            "Splitting oversized text for translation"
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            if chunk.trim().is_empty() {
                continue;
            }

            let part = self.request(chunk).await.inspect_err(|e| {
                warn!(
                    chunk = index + 1,
                    of = chunks.len(),
                    error = %e,
                    "Chunk translation failed"
                );
            })?;
            translated.push(part);
        }

        Ok(translated.join(" "))
    }

    async fn request(&self, text: &str) -> Result<String, TranslationError> {
        self.backend
            .translate(text, &self.source_language, &self.target_language)
            .await
    }
}

/// Split `text` into consecutive chunks of `max_chars` characters.
///
/// The last chunk may be shorter. Boundaries are counted in characters, so a
/// chunk never ends inside a multi-byte sequence. Empty input yields no chunks;
/// `max_chars == 0` disables splitting.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_chars == 0 {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / max_chars + 1);
    let mut start = 0;
    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % max_chars == 0 {
            chunks.push(&text[start..idx]);
            start = idx;
        }
    }
    chunks.push(&text[start..]);
    chunks
}
