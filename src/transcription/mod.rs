//! Transcription module for Quizzle.
//!
//! Handles speech-to-text over the OpenAI-compatible audio endpoint.
//! Whisper's verbose JSON response includes the detected language, which
//! drives the downstream translation step.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A transcript with its detected source language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// The full transcript text.
    pub text: String,
    /// Detected source language (ISO-639-1 code, e.g. "en").
    pub language: String,
}

impl Transcript {
    pub fn new(text: String, language: String) -> Self {
        Self { text, language }
    }
}

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return the text plus detected language.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;
}
