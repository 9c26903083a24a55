//! CLI module for Quizzle.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Quizzle - Video Summarization and Quiz Generation
///
/// A CLI tool that transcribes a video, summarizes it, and quizzes you on it.
#[derive(Parser, Debug)]
#[command(name = "quizzle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a quiz from a video and take it in the terminal
    Quiz {
        /// YouTube URL/ID, or local video/audio file path
        input: String,

        /// Target language for the transcript (ISO-639-1 code; defaults to
        /// the configured value)
        #[arg(short = 'l', long)]
        target_lang: Option<String>,

        /// Quiz difficulty (basic, medium, hard; defaults to the configured
        /// value)
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Write the transcript, summary, and quiz as JSON instead of
        /// running the interactive quiz
        #[arg(short, long)]
        output: Option<String>,

        /// Show the full transcript before the quiz
        #[arg(long)]
        show_transcript: bool,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Start HTTP API server for frontend integration
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Open configuration file in editor
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_lang_and_difficulty_default_to_config() {
        let cli = Cli::try_parse_from(["quizzle", "quiz", "video.mp4"]).unwrap();
        match cli.command {
            Commands::Quiz {
                target_lang,
                difficulty,
                ..
            } => {
                // Absent flags stay None so the configured values apply
                assert_eq!(target_lang, None);
                assert_eq!(difficulty, None);
            }
            _ => panic!("expected quiz command"),
        }
    }

    #[test]
    fn test_quiz_flags_override() {
        let cli =
            Cli::try_parse_from(["quizzle", "quiz", "video.mp4", "-l", "hi", "-d", "hard"])
                .unwrap();
        match cli.command {
            Commands::Quiz {
                target_lang,
                difficulty,
                ..
            } => {
                assert_eq!(target_lang.as_deref(), Some("hi"));
                assert_eq!(difficulty.as_deref(), Some("hard"));
            }
            _ => panic!("expected quiz command"),
        }
    }
}
