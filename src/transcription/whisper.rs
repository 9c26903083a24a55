//! Whisper transcription over the OpenAI-compatible audio endpoint.

use super::{Transcriber, Transcript};
use crate::audio::split_audio;
use crate::config::{LlmSettings, TranscriptionSettings};
use crate::error::{QuizzleError, Result};
use crate::llm::create_client;
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    chunk_duration_seconds: u32,
    max_concurrent_chunks: usize,
}

impl WhisperTranscriber {
    /// Create a transcriber from settings.
    pub fn new(transcription: &TranscriptionSettings, llm: &LlmSettings) -> Self {
        Self::with_config(
            &transcription.model,
            llm.api_base.as_deref(),
            transcription.chunk_duration_seconds,
            transcription.max_concurrent_chunks,
        )
    }

    /// Create a transcriber with explicit configuration.
    pub fn with_config(
        model: &str,
        api_base: Option<&str>,
        chunk_duration_seconds: u32,
        max_concurrent_chunks: usize,
    ) -> Self {
        Self {
            client: create_client(api_base),
            model: model.to_string(),
            chunk_duration_seconds,
            max_concurrent_chunks,
        }
    }

    /// Transcribe a single audio file (no splitting).
    ///
    /// Returns the text and the language Whisper detected.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_single(&self, audio_path: &Path) -> Result<(String, String)> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.wav")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .response_format(AudioResponseFormat::VerboseJson)
            .build()
            .map_err(|e| QuizzleError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe_verbose_json(request)
            .await
            .map_err(|e| QuizzleError::Llm(format!("Whisper API error: {}", e)))?;

        Ok((response.text.trim().to_string(), response.language))
    }

    /// Transcribe an audio file, splitting into chunks if necessary.
    ///
    /// Chunks are transcribed concurrently and joined in playback order; the
    /// detected language is taken from the first chunk.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_with_splitting(&self, audio_path: &Path) -> Result<Transcript> {
        let temp_dir = tempfile::tempdir()?;
        let chunks = split_audio(audio_path, temp_dir.path(), self.chunk_duration_seconds).await?;

        if chunks.len() == 1 {
            let (text, language) = self.transcribe_single(audio_path).await?;
            return Ok(Transcript::new(text, language));
        }

        let chunk_count = chunks.len();
        info!("Processing {} audio chunks with {}", chunk_count, self.model);

        let pb = Arc::new(ProgressBar::new(chunk_count as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} Whisper   [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );

        // Process chunks in parallel with concurrency limit, fail fast on error
        let mut results: Vec<(usize, String, String)> = Vec::with_capacity(chunk_count);

        let mut stream = stream::iter(chunks.into_iter().enumerate())
            .map(|(idx, chunk_path)| async move {
                let result = self.transcribe_single(&chunk_path).await;
                (idx, result)
            })
            .buffer_unordered(self.max_concurrent_chunks);

        while let Some((idx, result)) = stream.next().await {
            pb.inc(1);
            match result {
                Ok((text, language)) => results.push((idx, text, language)),
                Err(e) => {
                    pb.finish_and_clear();
                    drop(temp_dir);
                    return Err(QuizzleError::Transcription(format!(
                        "Chunk {} failed: {}",
                        idx, e
                    )));
                }
            }
        }

        pb.finish_and_clear();

        // Sort by chunk index and merge text
        results.sort_by_key(|(idx, _, _)| *idx);

        let language = results
            .first()
            .map(|(_, _, lang)| lang.clone())
            .unwrap_or_else(|| "en".to_string());

        let text = results
            .into_iter()
            .map(|(_, text, _)| text)
            .collect::<Vec<_>>()
            .join(" ");

        drop(temp_dir);

        Ok(Transcript::new(text, language))
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
        self.transcribe_with_splitting(audio_path).await
    }
}
