//! Quiz response parsing.
//!
//! The generation model returns one of two forms: a JSON array (optionally
//! wrapped in markdown code fences) or the legacy "Question:/A)/Answer:"
//! free text. Parsing never fails: malformed entries are dropped and
//! counted, and completely unparseable input yields an empty quiz.

use super::{LegacyQuestion, Quiz, QuizQuestion};
use serde::Deserialize;
use tracing::{debug, warn};

/// Marker that starts each block in the legacy free-text form.
const QUESTION_MARKER: &str = "Question:";

/// Parse raw model output into a quiz.
///
/// Tries the JSON form first, then the legacy free-text form. Returns an
/// empty quiz when neither matches; the failure is logged, never raised.
pub fn parse(raw: &str) -> Quiz {
    parse_expecting(raw, None)
}

/// Parse raw model output, enforcing an expected option count per question.
///
/// Questions whose option count deviates from `expected_options` are dropped
/// and counted like any other malformed entry, so a caller that requested
/// 4-option questions can tell when the model shorted it.
pub fn parse_expecting(raw: &str, expected_options: Option<usize>) -> Quiz {
    let mut quiz = parse_any_form(raw);

    if let Some(expected) = expected_options {
        let before = quiz.questions.len();
        quiz.questions.retain(|q| q.options.len() == expected);
        let removed = before - quiz.questions.len();
        if removed > 0 {
            warn!(
                "Dropped {} question(s) without exactly {} options",
                removed, expected
            );
            quiz.dropped_blocks += removed;
        }
    }

    quiz
}

fn parse_any_form(raw: &str) -> Quiz {
    let stripped = strip_code_fences(raw);

    if let Some(quiz) = parse_json(stripped) {
        if quiz.dropped_blocks > 0 {
            warn!(
                "Dropped {} malformed quiz entr(ies) from JSON response",
                quiz.dropped_blocks
            );
        }
        return quiz;
    }

    if raw.contains(QUESTION_MARKER) {
        return parse_legacy_canonical(raw);
    }

    let preview: String = raw.chars().take(200).collect();
    warn!("Could not parse model output as a quiz: {}", preview);
    Quiz::default()
}

/// Strip leading/trailing markdown code fence lines (e.g. ```json ... ```).
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // The opening fence line may carry a language tag
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };

    rest.trim_end()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or_else(|| rest.trim())
}

/// Raw JSON shape expected from the model; validated before acceptance.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    correct_answer: Option<usize>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Try to parse the stripped text as a JSON array of questions.
///
/// Returns None when the text is not a JSON array at all; returns a quiz
/// with per-entry validation (dropping and counting malformed entries)
/// otherwise.
fn parse_json(stripped: &str) -> Option<Quiz> {
    // Tolerate prose around the array
    let json_str = match (stripped.find('['), stripped.rfind(']')) {
        (Some(start), Some(end)) if end > start => &stripped[start..=end],
        _ => stripped,
    };

    let values: Vec<serde_json::Value> = serde_json::from_str(json_str).ok()?;

    let mut questions = Vec::new();
    let mut dropped = 0usize;

    for value in values {
        match validate_entry(value) {
            Some(question) => questions.push(question),
            None => dropped += 1,
        }
    }

    debug!("Parsed {} question(s), dropped {}", questions.len(), dropped);

    Some(Quiz {
        questions,
        dropped_blocks: dropped,
    })
}

/// Validate a single JSON entry into a canonical question.
fn validate_entry(value: serde_json::Value) -> Option<QuizQuestion> {
    let raw: RawQuestion = serde_json::from_value(value).ok()?;

    if raw.question.trim().is_empty() || raw.options.is_empty() {
        return None;
    }

    let correct_answer = raw.correct_answer?;
    if correct_answer >= raw.options.len() {
        return None;
    }

    Some(QuizQuestion {
        question: raw.question,
        options: raw.options,
        correct_answer,
        explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
    })
}

/// Parse the legacy free-text form into raw legacy questions.
///
/// Blocks are split on the literal "Question:" marker. The first line of a
/// block is the question; a line starting with "Answer:" (case-insensitive)
/// sets the answer key with its raw "B)"-style prefix; any other non-blank
/// line is an option, in encountered order. Blocks missing any of the three
/// parts are silently dropped and counted.
pub fn parse_legacy(raw: &str) -> (Vec<LegacyQuestion>, usize) {
    let mut questions = Vec::new();
    let mut dropped = 0usize;

    for block in raw.split(QUESTION_MARKER).skip(1) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let mut lines = block.lines();
        let question = lines.next().map(str::trim).unwrap_or("").to_string();

        let mut options = Vec::new();
        let mut answer = String::new();

        for line in lines {
            let line = line.trim();
            if line.to_lowercase().starts_with("answer:") {
                answer = line["answer:".len()..].trim().to_string();
            } else if !line.is_empty() {
                options.push(line.to_string());
            }
        }

        if !question.is_empty() && !options.is_empty() && !answer.is_empty() {
            questions.push(LegacyQuestion {
                question,
                options,
                answer,
            });
        } else {
            dropped += 1;
        }
    }

    (questions, dropped)
}

/// Parse legacy free text and convert to the canonical index-based model.
///
/// Blocks whose answer letter matches no option are dropped as well.
fn parse_legacy_canonical(raw: &str) -> Quiz {
    let (legacy, mut dropped) = parse_legacy(raw);

    let mut questions = Vec::new();
    for entry in legacy {
        match entry.into_question() {
            Some(question) => questions.push(question),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("Dropped {} malformed legacy quiz block(s)", dropped);
    }

    Quiz {
        questions,
        dropped_blocks: dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let raw = r#"[
            {"question": "What is 2+2?", "options": ["3", "4", "5", "6"], "correctAnswer": 1, "explanation": "Basic arithmetic."},
            {"question": "Capital of France?", "options": ["Paris", "Lyon", "Nice", "Lille"], "correctAnswer": 0}
        ]"#;

        let quiz = parse(raw);
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.dropped_blocks, 0);
        assert_eq!(quiz.questions[0].correct_answer, 1);
        assert_eq!(quiz.questions[0].options, vec!["3", "4", "5", "6"]);
        assert_eq!(quiz.questions[1].explanation, None);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n[{\"question\":\"Q\",\"options\":[\"a\",\"b\",\"c\",\"d\"],\"correctAnswer\":0}]\n```";

        let quiz = parse(raw);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, 0);
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let raw = "Here is your quiz:\n[{\"question\":\"Q\",\"options\":[\"a\",\"b\"],\"correctAnswer\":1}]\nEnjoy!";

        let quiz = parse(raw);
        assert_eq!(quiz.len(), 1);
    }

    #[test]
    fn test_malformed_entries_dropped_and_counted() {
        let raw = r#"[
            {"question": "Good", "options": ["a", "b", "c", "d"], "correctAnswer": 2},
            {"question": "", "options": ["a", "b"], "correctAnswer": 0},
            {"question": "Out of range", "options": ["a", "b"], "correctAnswer": 5},
            {"question": "No answer", "options": ["a", "b"]}
        ]"#;

        let quiz = parse(raw);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.dropped_blocks, 3);
    }

    #[test]
    fn test_unparseable_input_yields_empty_quiz() {
        let quiz = parse("complete nonsense with no structure at all");
        assert!(quiz.is_empty());
        assert_eq!(quiz.dropped_blocks, 0);
    }

    #[test]
    fn test_malformed_json_yields_empty_quiz() {
        let quiz = parse("[{\"question\": \"unterminated");
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_parse_legacy_block() {
        let raw = "Question: Q1\nA) x\nB) y\nAnswer: B)";

        let (questions, dropped) = parse_legacy(raw);
        assert_eq!(dropped, 0);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Q1");
        assert_eq!(questions[0].options, vec!["A) x", "B) y"]);
        assert_eq!(questions[0].answer, "B)");
    }

    #[test]
    fn test_parse_legacy_case_insensitive_answer_marker() {
        let raw = "Question: Q1\nA) x\nB) y\nanswer: A)";

        let (questions, _) = parse_legacy(raw);
        assert_eq!(questions[0].answer, "A)");
    }

    #[test]
    fn test_parse_legacy_drops_incomplete_blocks() {
        let raw = "Question: Has no options\nAnswer: A)\nQuestion: Complete\nA) yes\nB) no\nAnswer: A)";

        let (questions, dropped) = parse_legacy(raw);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Complete");
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_parse_converts_legacy_to_canonical() {
        let raw = "Question: Q1\nA) x\nB) y\nC) z\nD) w\nAnswer: C)";

        let quiz = parse(raw);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, 2);
        assert_eq!(quiz.questions[0].options[2], "C) z");
    }

    #[test]
    fn test_legacy_preamble_is_ignored() {
        let raw = "Here are your questions!\nQuestion: Q1\nA) x\nB) y\nAnswer: A)";

        let quiz = parse(raw);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.dropped_blocks, 0);
    }

    #[test]
    fn test_expected_option_count_enforced() {
        let raw = r#"[
            {"question": "Full", "options": ["a", "b", "c", "d"], "correctAnswer": 0},
            {"question": "Short", "options": ["a", "b"], "correctAnswer": 1}
        ]"#;

        let quiz = parse_expecting(raw, Some(4));
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].question, "Full");
        assert_eq!(quiz.dropped_blocks, 1);

        // Without an expectation both entries are kept
        let quiz = parse(raw);
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.dropped_blocks, 0);
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("[1]"), "[1]");
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }
}
