//! Prompt templates for Quizzle.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub quiz: QuizPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for transcript summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful AI that summarizes transcripts.".to_string(),

            user: r#"Based on the following transcript, summarize the entire video in bullet points within 250 words.

TRANSCRIPT:
{{transcript}}

Provide only the summary text, one bullet point per line. Do not give any extra additional information."#.to_string(),
        }
    }
}

/// Prompts for quiz generation.
///
/// `user_json` requests the structured JSON form; `user_text` requests the
/// legacy "Question:/A)/Answer:" free-text form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPrompts {
    pub system: String,
    pub user_json: String,
    pub user_text: String,
}

impl Default for QuizPrompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful AI that generates quizzes from the given transcript."
                .to_string(),

            user_json: r#"Based on the following transcript and summary, generate exactly {{question_count}} multiple-choice quiz questions with {{option_count}} options each.
The difficulty level should be: {{difficulty}}.

TRANSCRIPT:
{{transcript}}

SUMMARY:
{{summary}}

Output must be a valid JSON array, strictly like this format. Do not give any extra additional information.
[
    {
        "question": "What is ...?",
        "options": ["Option A", "Option B", "Option C", "Option D"],
        "correctAnswer": 1,
        "explanation": "Why this answer is correct."
    }
]"#
            .to_string(),

            user_text: r#"Based on the following transcript and summary, generate exactly {{question_count}} multiple-choice quiz questions with {{option_count}} options each.
The difficulty level should be: {{difficulty}}.

TRANSCRIPT:
{{transcript}}

SUMMARY:
{{summary}}

IMPORTANT: Follow this format EXACTLY for EACH question. Do not add any other text or introductions.

Question: [Your question here]
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Answer: [The correct option letter, e.g., B)]"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let quiz_path = custom_path.join("quiz.toml");
            if quiz_path.exists() {
                let content = std::fs::read_to_string(&quiz_path)?;
                prompts.quiz = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.summary.system.is_empty());
        assert!(prompts.quiz.user_json.contains("correctAnswer"));
        assert!(prompts.quiz.user_text.contains("Question:"));
    }

    #[test]
    fn test_render_template() {
        let template = "Generate {{question_count}} questions at {{difficulty}} difficulty.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("question_count".to_string(), "5".to_string());
        vars.insert("difficulty".to_string(), "medium".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Generate 5 questions at medium difficulty.");
    }
}
