//! Transcript translation for Quizzle.
//!
//! The translator receives the transcript plus source and target language
//! codes, and returns the input unchanged when they already match.

mod google;

pub use google::GoogleTranslator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for translation services.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from `source_lang` to `target_lang` (ISO-639-1 codes).
    ///
    /// Implementations must return the input unchanged when the languages match.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

/// Normalize a language identifier to an ISO-639-1 code.
///
/// Whisper's verbose response reports full language names ("english"), while
/// the translation endpoint wants two-letter codes. Unknown names pass
/// through lowercased so the translator can surface a useful error.
pub fn normalize_lang(lang: &str) -> String {
    let lang = lang.trim().to_lowercase();

    if lang.len() == 2 {
        return lang;
    }

    match lang.as_str() {
        "english" => "en",
        "spanish" => "es",
        "french" => "fr",
        "german" => "de",
        "italian" => "it",
        "portuguese" => "pt",
        "russian" => "ru",
        "hindi" => "hi",
        "kannada" => "kn",
        "japanese" => "ja",
        "korean" => "ko",
        "chinese" | "mandarin" => "zh",
        "arabic" => "ar",
        "dutch" => "nl",
        "polish" => "pl",
        "turkish" => "tr",
        "ukrainian" => "uk",
        "vietnamese" => "vi",
        "norwegian" => "no",
        "swedish" => "sv",
        "danish" => "da",
        "finnish" => "fi",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lang() {
        assert_eq!(normalize_lang("english"), "en");
        assert_eq!(normalize_lang("English"), "en");
        assert_eq!(normalize_lang("en"), "en");
        assert_eq!(normalize_lang("ES"), "es");
        assert_eq!(normalize_lang("kannada"), "kn");
        // Unknown names pass through lowercased
        assert_eq!(normalize_lang("klingon"), "klingon");
    }
}
