//! Quizzle - Video Summarization and Quiz Generation
//!
//! A CLI tool that turns videos into multiple-choice quizzes.
//!
//! # Overview
//!
//! Quizzle allows you to:
//! - Extract audio from YouTube videos and local video/audio files
//! - Transcribe speech and detect the spoken language
//! - Translate the transcript into a target language
//! - Summarize the transcript and generate a 5-question quiz
//! - Take the quiz in the terminal and get per-question feedback
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt management
//! - `media` - Media source abstraction (YouTube, local files)
//! - `audio` - Audio download and extraction
//! - `transcription` - Speech-to-text transcription
//! - `translation` - Transcript translation
//! - `summary` - Transcript summarization
//! - `quiz` - Quiz model, response parsing, and answer verification
//! - `pipeline` - End-to-end pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use quizzle::config::Settings;
//! use quizzle::pipeline::QuizPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = QuizPipeline::new(settings)?;
//!
//!     // Generate a quiz from a YouTube video
//!     let output = pipeline.run("dQw4w9WgXcQ", "en", "medium").await?;
//!     println!("Generated {} questions", output.quiz.questions.len());
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod media;
pub mod pipeline;
pub mod quiz;
pub mod summary;
pub mod transcription;
pub mod translation;

pub use error::{QuizzleError, Result};
