//! End-to-end pipeline for Quizzle.
//!
//! Coordinates media acquisition, transcription, translation, summarization,
//! and quiz generation. Data flows strictly one direction; a failed external
//! call surfaces as an error with no retries.

use crate::audio::acquire_audio;
use crate::config::{Prompts, Settings};
use crate::error::{QuizzleError, Result};
use crate::media::parse_input;
use crate::quiz::{Quiz, QuizGenerator};
use crate::summary::Summarizer;
use crate::transcription::{Transcriber, WhisperTranscriber};
use crate::translation::{normalize_lang, GoogleTranslator, Translator};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The main pipeline: video in, quiz out.
pub struct QuizPipeline {
    settings: Settings,
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    summarizer: Summarizer,
    generator: QuizGenerator,
    temp_dir: PathBuf,
}

impl QuizPipeline {
    /// Create a new pipeline with default components.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcriber: Arc<dyn Transcriber> =
            Arc::new(WhisperTranscriber::new(&settings.transcription, &settings.llm));

        let translator: Arc<dyn Translator> =
            Arc::new(GoogleTranslator::new(&settings.translation.endpoint));

        let summarizer = Summarizer::new(&settings.llm).with_prompts(prompts.clone());
        let generator =
            QuizGenerator::new(&settings.llm, &settings.quiz).with_prompts(prompts);

        let temp_dir = settings.temp_dir();
        std::fs::create_dir_all(&temp_dir)?;

        Ok(Self {
            settings,
            transcriber,
            translator,
            summarizer,
            generator,
            temp_dir,
        })
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        summarizer: Summarizer,
        generator: QuizGenerator,
    ) -> Result<Self> {
        let temp_dir = settings.temp_dir();
        std::fs::create_dir_all(&temp_dir)?;

        Ok(Self {
            settings,
            transcriber,
            translator,
            summarizer,
            generator,
            temp_dir,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the full pipeline on a YouTube URL/ID or local file path.
    #[instrument(skip(self), fields(input = %input, target_lang = %target_lang))]
    pub async fn run(&self, input: &str, target_lang: &str, difficulty: &str) -> Result<PipelineOutput> {
        // Resolve the input to a source
        let (source, media_id) = parse_input(input).ok_or_else(|| {
            QuizzleError::InvalidInput(format!("Could not parse input: {}", input))
        })?;

        // Fetch metadata
        info!("Fetching metadata for {}", media_id);
        eprintln!("  Fetching metadata...");
        let metadata = source.fetch_media(&media_id).await?;
        eprintln!("  Title: {}", metadata.title);

        // Check duration limit
        if let Some(duration) = metadata.duration_seconds {
            let mins = duration / 60;
            let secs = duration % 60;
            eprintln!("  Duration: {}:{:02}", mins, secs);
            if duration > self.settings.media.max_duration_seconds {
                return Err(QuizzleError::InvalidInput(format!(
                    "Media duration ({} seconds) exceeds maximum ({} seconds)",
                    duration, self.settings.media.max_duration_seconds
                )));
            }
        }

        // Acquire audio
        info!("Acquiring audio for: {}", metadata.title);
        eprintln!("  Extracting audio...");
        let audio = acquire_audio(
            &metadata,
            &self.temp_dir,
            self.settings.cookies_file().as_deref(),
        )
        .await?;

        // Transcribe; run the rest inside a block so temp audio is always
        // cleaned up, success or failure
        let result = self.run_from_audio(&audio.path, target_lang, difficulty).await;

        if audio.temporary {
            if let Err(e) = std::fs::remove_file(&audio.path) {
                warn!("Failed to clean up audio file: {}", e);
            }
        }

        let (transcript, detected_language, summary, quiz) = result?;

        Ok(PipelineOutput {
            media_id: metadata.id,
            title: metadata.title,
            transcript,
            detected_language,
            summary,
            quiz,
        })
    }

    /// Transcribe, translate, summarize, and generate from a local audio file.
    async fn run_from_audio(
        &self,
        audio_path: &std::path::Path,
        target_lang: &str,
        difficulty: &str,
    ) -> Result<(String, String, String, Quiz)> {
        info!("Transcribing audio...");
        eprintln!("  Transcribing...");
        let transcript = self.transcriber.transcribe(audio_path).await?;
        let detected_language = normalize_lang(&transcript.language);
        eprintln!("  Detected language: {}", detected_language.to_uppercase());

        info!("Translating transcript...");
        let final_transcript = self
            .translator
            .translate(&transcript.text, &detected_language, target_lang)
            .await?;

        info!("Generating summary...");
        eprintln!("  Summarizing...");
        let summary = self.summarizer.summarize(&final_transcript).await?;

        info!("Generating quiz...");
        eprintln!("  Generating quiz...");
        let quiz = self
            .generator
            .generate(&final_transcript, &summary, difficulty)
            .await?;

        if quiz.dropped_blocks > 0 {
            warn!(
                "Quiz came back with {} question(s), {} block(s) dropped",
                quiz.len(),
                quiz.dropped_blocks
            );
        }

        Ok((final_transcript, detected_language, summary, quiz))
    }
}

/// Result of a full pipeline run.
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    /// Media ID.
    pub media_id: String,
    /// Title.
    pub title: String,
    /// Final (translated) transcript.
    pub transcript: String,
    /// Language detected by transcription (ISO-639-1).
    pub detected_language: String,
    /// Bullet-point summary.
    pub summary: String,
    /// The generated quiz.
    pub quiz: Quiz,
}
