//! Configuration settings for Quizzle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub media: MediaSettings,
    pub transcription: TranscriptionSettings,
    pub translation: TranslationSettings,
    pub llm: LlmSettings,
    pub quiz: QuizSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary files (downloaded/extracted audio).
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/quizzle".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Media acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Maximum media duration to process (in seconds).
    pub max_duration_seconds: u32,
    /// Optional cookies file passed to yt-dlp (for age-restricted videos).
    pub cookies_file: Option<String>,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            max_duration_seconds: 7200, // 2 hours
            cookies_file: None,
        }
    }
}

/// Transcription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
    /// Duration in seconds for splitting long audio files.
    pub chunk_duration_seconds: u32,
    /// Maximum concurrent chunk transcriptions.
    pub max_concurrent_chunks: usize,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-large-v3".to_string(),
            chunk_duration_seconds: 300,
            max_concurrent_chunks: 3,
        }
    }
}

/// Translation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Default target language (ISO-639-1 code).
    pub target_lang: String,
    /// Translation endpoint (Google Translate web API).
    pub endpoint: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            target_lang: "en".to_string(),
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
        }
    }
}

/// LLM settings for summarization and quiz generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model for summaries and quizzes.
    pub model: String,
    /// API base URL. Defaults to Groq's OpenAI-compatible endpoint.
    pub api_base: Option<String>,
    /// Sampling temperature for chat completions.
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            api_base: Some("https://api.groq.com/openai/v1".to_string()),
            temperature: 0.7,
        }
    }
}

/// Quiz response format requested from the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuizFormat {
    /// Structured JSON array (default).
    #[default]
    Json,
    /// Legacy "Question:/A)/B)/Answer:" free text.
    Text,
}

impl std::str::FromStr for QuizFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(QuizFormat::Json),
            "text" | "legacy" => Ok(QuizFormat::Text),
            _ => Err(format!("Unknown quiz format: {}", s)),
        }
    }
}

impl std::fmt::Display for QuizFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizFormat::Json => write!(f, "json"),
            QuizFormat::Text => write!(f, "text"),
        }
    }
}

/// Quiz generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Number of questions to request from the model.
    pub question_count: usize,
    /// Number of options per question.
    pub option_count: usize,
    /// Default difficulty (basic, medium, hard).
    pub difficulty: String,
    /// Response format requested from the model.
    pub format: QuizFormat,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: 5,
            option_count: 4,
            difficulty: "medium".to_string(),
            format: QuizFormat::Json,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::QuizzleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizzle")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    /// Get the expanded cookies file path, if configured and present on disk.
    pub fn cookies_file(&self) -> Option<PathBuf> {
        self.media
            .cookies_file
            .as_deref()
            .map(Self::expand_path)
            .filter(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.quiz.question_count, 5);
        assert_eq!(settings.quiz.option_count, 4);
        assert_eq!(settings.quiz.format, QuizFormat::Json);
        assert_eq!(settings.translation.target_lang, "en");
    }

    #[test]
    fn test_quiz_format_parse() {
        assert_eq!("json".parse::<QuizFormat>().unwrap(), QuizFormat::Json);
        assert_eq!("legacy".parse::<QuizFormat>().unwrap(), QuizFormat::Text);
        assert!("xml".parse::<QuizFormat>().is_err());
    }

    #[test]
    fn test_roundtrip_toml() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.llm.model, settings.llm.model);
    }
}
