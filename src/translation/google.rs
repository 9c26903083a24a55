//! Google Translate web endpoint implementation.
//!
//! Uses the unauthenticated `translate_a/single` endpoint (client=gtx), the
//! same service the original deep-translator wrapper talks to. Long
//! transcripts are sent in pieces because the endpoint rejects very large
//! queries.

use super::Translator;
use crate::error::{QuizzleError, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Maximum characters per translation request.
const MAX_CHUNK_CHARS: usize = 4500;

/// Translator backed by the Google Translate web endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Translate a single piece of text.
    async fn translate_chunk(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| QuizzleError::Translation(format!("Translation request failed: {e}")))?;

        let body: serde_json::Value = response.json().await?;

        // Response shape: [[["translated", "original", ...], ...], ...]
        let segments = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| QuizzleError::Translation("Unexpected translation response".into()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }

        Ok(translated)
    }

    /// Split text into chunks below the request size limit, on sentence
    /// boundaries where possible.
    fn split_text(text: &str) -> Vec<String> {
        if text.len() <= MAX_CHUNK_CHARS {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for sentence in text.split_inclusive(['.', '!', '?']) {
            if current.len() + sentence.len() > MAX_CHUNK_CHARS && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }

            // A single sentence longer than the limit gets hard-split
            if sentence.len() > MAX_CHUNK_CHARS {
                let mut rest = sentence;
                while rest.len() > MAX_CHUNK_CHARS {
                    let mut cut = MAX_CHUNK_CHARS;
                    while !rest.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    chunks.push(rest[..cut].to_string());
                    rest = &rest[cut..];
                }
                current.push_str(rest);
            } else {
                current.push_str(sentence);
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(skip(self, text), fields(source = %source_lang, target = %target_lang, chars = text.len()))]
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        if source_lang == target_lang {
            debug!("Source and target language match, skipping translation");
            return Ok(text.to_string());
        }

        let chunks = Self::split_text(text);
        debug!("Translating {} chunk(s)", chunks.len());

        let mut result = String::new();
        for chunk in &chunks {
            let translated = self.translate_chunk(chunk, source_lang, target_lang).await?;
            if !result.is_empty() && !translated.starts_with(' ') {
                result.push(' ');
            }
            result.push_str(&translated);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_language_is_identity() {
        let translator = GoogleTranslator::new("http://localhost:0/unused");
        let text = "No network call should happen here.";
        let result = translator.translate(text, "en", "en").await.unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_split_text_short() {
        let chunks = GoogleTranslator::split_text("Short text.");
        assert_eq!(chunks, vec!["Short text.".to_string()]);
    }

    #[test]
    fn test_split_text_long() {
        let sentence = "This is a sentence that repeats. ";
        let text = sentence.repeat(300); // ~10k chars
        let chunks = GoogleTranslator::split_text(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_CHUNK_CHARS);
        }
        // No content lost
        assert_eq!(chunks.concat(), text);
    }
}
