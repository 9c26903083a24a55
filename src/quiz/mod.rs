//! Quiz model, response parsing, and answer verification.
//!
//! The canonical quiz representation is index-based: each question stores a
//! 0-based `correct_answer` index into its `options`. The legacy free-text
//! form ("Question:/A)/Answer: B)") is converted into this model at the
//! parser boundary; only the legacy verifier still compares answer letters.

pub mod generator;
pub mod parser;
pub mod verifier;

pub use generator::QuizGenerator;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder used when the model returned no explanation.
pub const NO_EXPLANATION: &str = "No explanation provided.";

/// A single multiple-choice question.
///
/// Option order is semantically meaningful: it defines both display order
/// and the index/letter used for answer matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The question text (non-empty).
    pub question: String,
    /// Ordered answer options.
    pub options: Vec<String>,
    /// 0-based index of the correct option; always within `options`.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    /// Why the correct answer is correct, when the model provided it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    /// The explanation text, falling back to the placeholder.
    pub fn explanation_or_default(&self) -> &str {
        self.explanation.as_deref().unwrap_or(NO_EXPLANATION)
    }
}

/// An ordered set of quiz questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Questions in presentation order.
    pub questions: Vec<QuizQuestion>,
    /// How many malformed blocks the parser dropped to produce this quiz.
    /// Lets callers detect a quiz that came back shorter than requested.
    #[serde(default)]
    pub dropped_blocks: usize,
}

impl Quiz {
    pub fn from_questions(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            dropped_blocks: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Map from question index to the user's chosen option index.
///
/// Absence of a key means "no answer".
pub type UserAnswers = HashMap<usize, usize>;

/// A question parsed from the legacy free-text quiz form.
///
/// Options keep their raw lines (including the "A) " prefix) and the answer
/// keeps the raw key the model produced (e.g. "B)").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl LegacyQuestion {
    /// Convert to the canonical index-based model.
    ///
    /// The answer key's first character is matched against each option's
    /// first character (the letter prefix). Returns None when no option
    /// matches, so malformed blocks degrade quiz length instead of
    /// propagating a bogus index.
    pub fn into_question(self) -> Option<QuizQuestion> {
        let key = self.answer.chars().next()?;
        let index = self
            .options
            .iter()
            .position(|opt| opt.chars().next() == Some(key))?;

        Some(QuizQuestion {
            question: self.question,
            options: self.options,
            correct_answer: index,
            explanation: None,
        })
    }
}

/// Correctness detail for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    /// The question text.
    pub question: String,
    /// Full text of the user's chosen option; None when unanswered.
    pub user_answer: Option<String>,
    /// Full text of the correct option.
    pub correct_answer: String,
    /// Whether the user's answer matched.
    pub is_correct: bool,
    /// Explanation (placeholder when the question carried none).
    pub explanation: String,
}

/// Result of verifying a set of answers against a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Per-question details in quiz order.
    pub details: Vec<AnswerDetail>,
    /// Number of correct answers.
    pub score: usize,
    /// Number of questions.
    pub total: usize,
    /// `round(100 * score / total)`, or 0 for an empty quiz.
    pub percentage: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanation_default() {
        let q = QuizQuestion {
            question: "Q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 0,
            explanation: None,
        };
        assert_eq!(q.explanation_or_default(), NO_EXPLANATION);
    }

    #[test]
    fn test_legacy_conversion() {
        let legacy = LegacyQuestion {
            question: "Q1".to_string(),
            options: vec!["A) x".to_string(), "B) y".to_string()],
            answer: "B)".to_string(),
        };
        let q = legacy.into_question().unwrap();
        assert_eq!(q.correct_answer, 1);
        assert_eq!(q.options, vec!["A) x", "B) y"]);
    }

    #[test]
    fn test_legacy_conversion_no_match() {
        let legacy = LegacyQuestion {
            question: "Q1".to_string(),
            options: vec!["A) x".to_string(), "B) y".to_string()],
            answer: "Z)".to_string(),
        };
        assert!(legacy.into_question().is_none());
    }

    #[test]
    fn test_question_serde_uses_camel_case_index() {
        let json = r#"{"question":"Q","options":["a","b","c","d"],"correctAnswer":2}"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, 2);
        assert_eq!(q.explanation, None);

        let out = serde_json::to_string(&q).unwrap();
        assert!(out.contains("correctAnswer"));
        assert!(!out.contains("explanation"));
    }
}
