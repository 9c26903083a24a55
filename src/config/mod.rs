//! Configuration management for Quizzle.

mod prompts;
mod settings;

pub use prompts::{Prompts, QuizPrompts, SummaryPrompts};
pub use settings::{
    GeneralSettings, LlmSettings, MediaSettings, PromptSettings, QuizFormat, QuizSettings,
    Settings, TranscriptionSettings, TranslationSettings,
};
