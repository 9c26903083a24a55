//! Error types for Quizzle.

use thiserror::Error;

/// Library-level error type for Quizzle operations.
#[derive(Error, Debug)]
pub enum QuizzleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Media source error: {0}")]
    MediaSource(String),

    #[error("Audio extraction failed: {0}")]
    AudioExtraction(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Quiz generation failed: {0}")]
    QuizGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error: {0}")]
    Llm(String),

    #[error("Media not found: {0}")]
    MediaNotFound(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Quizzle operations.
pub type Result<T> = std::result::Result<T, QuizzleError>;
