//! Answer verification and scoring.
//!
//! Pure functions of (quiz, answers); safe to call repeatedly with the same
//! inputs. Missing or out-of-range answers count as "no answer", never as
//! an error, and an empty quiz scores 0% without a division error.

use super::{AnswerDetail, LegacyQuestion, Quiz, UserAnswers, VerificationResult, NO_EXPLANATION};

/// Verify user answers against a quiz using index equality.
pub fn verify(quiz: &Quiz, answers: &UserAnswers) -> VerificationResult {
    let mut details = Vec::with_capacity(quiz.len());
    let mut correct_count = 0usize;

    for (i, q) in quiz.questions.iter().enumerate() {
        // Out-of-range selections are treated the same as no answer
        let user_idx = answers.get(&i).copied().filter(|&idx| idx < q.options.len());

        let is_correct = user_idx == Some(q.correct_answer);
        if is_correct {
            correct_count += 1;
        }

        details.push(AnswerDetail {
            question: q.question.clone(),
            user_answer: user_idx.map(|idx| q.options[idx].clone()),
            // The parser guarantees correct_answer is in range
            correct_answer: q.options[q.correct_answer].clone(),
            is_correct,
            explanation: q.explanation_or_default().to_string(),
        });
    }

    let total = quiz.len();
    VerificationResult {
        details,
        score: correct_count,
        total,
        percentage: percentage(correct_count, total),
    }
}

/// Verify answers for the legacy free-text quiz form.
///
/// `selected` holds the user's chosen option strings aligned by position
/// with the questions. Matching compares only the first character of the
/// selection against the first character of the stored answer key, which
/// tolerates formatting differences like "B)" vs "B) Option text". The
/// comparison is case-sensitive, as produced by the model.
pub fn verify_legacy(
    questions: &[LegacyQuestion],
    selected: &[Option<String>],
) -> VerificationResult {
    let mut details = Vec::with_capacity(questions.len());
    let mut correct_count = 0usize;

    for (i, q) in questions.iter().enumerate() {
        let chosen = selected.get(i).and_then(|s| s.clone());

        let is_correct = match (&chosen, q.answer.chars().next()) {
            (Some(user), Some(key)) => user.trim().chars().next() == Some(key),
            _ => false,
        };
        if is_correct {
            correct_count += 1;
        }

        // Resolve the answer key to its full option text for display
        let correct_answer = q
            .options
            .iter()
            .find(|opt| opt.chars().next() == q.answer.chars().next())
            .cloned()
            .unwrap_or_else(|| q.answer.clone());

        details.push(AnswerDetail {
            question: q.question.clone(),
            user_answer: chosen,
            correct_answer,
            is_correct,
            explanation: NO_EXPLANATION.to_string(),
        });
    }

    let total = questions.len();
    VerificationResult {
        details,
        score: correct_count,
        total,
        percentage: percentage(correct_count, total),
    }
}

/// Rounded percentage with an explicit guard for the empty quiz.
fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((100.0 * score as f64) / total as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizQuestion;
    use std::collections::HashMap;

    fn sample_quiz() -> Quiz {
        Quiz::from_questions(vec![QuizQuestion {
            question: "Q1".to_string(),
            options: vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            correct_answer: 1,
            explanation: Some("because".to_string()),
        }])
    }

    #[test]
    fn test_correct_answer_scores() {
        let quiz = sample_quiz();
        let answers = HashMap::from([(0, 1)]);

        let result = verify(&quiz, &answers);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 1);
        assert_eq!(result.percentage, 100);
        assert!(result.details[0].is_correct);
        assert_eq!(result.details[0].user_answer.as_deref(), Some("B"));
        assert_eq!(result.details[0].correct_answer, "B");
        assert_eq!(result.details[0].explanation, "because");
    }

    #[test]
    fn test_missing_answer_is_not_an_error() {
        let quiz = sample_quiz();
        let answers = HashMap::new();

        let result = verify(&quiz, &answers);
        assert_eq!(result.score, 0);
        assert!(!result.details[0].is_correct);
        assert_eq!(result.details[0].user_answer, None);
    }

    #[test]
    fn test_out_of_range_answer_counts_as_no_answer() {
        let quiz = sample_quiz();
        let answers = HashMap::from([(0, 99)]);

        let result = verify(&quiz, &answers);
        assert_eq!(result.score, 0);
        assert_eq!(result.details[0].user_answer, None);
    }

    #[test]
    fn test_wrong_answer() {
        let quiz = sample_quiz();
        let answers = HashMap::from([(0, 3)]);

        let result = verify(&quiz, &answers);
        assert_eq!(result.score, 0);
        assert_eq!(result.details[0].user_answer.as_deref(), Some("D"));
        assert!(!result.details[0].is_correct);
    }

    #[test]
    fn test_empty_quiz_has_zero_percentage() {
        let quiz = Quiz::default();
        let result = verify(&quiz, &HashMap::new());

        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 0);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_verify_is_idempotent() {
        let quiz = sample_quiz();
        let answers = HashMap::from([(0, 2)]);

        let first = verify(&quiz, &answers);
        let second = verify(&quiz, &answers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_legacy_first_char_match() {
        let questions = vec![LegacyQuestion {
            question: "Q1".to_string(),
            options: vec!["A) x".to_string(), "B) y".to_string()],
            answer: "B)".to_string(),
        }];

        let selected = vec![Some("B) y".to_string())];
        let result = verify_legacy(&questions, &selected);
        assert_eq!(result.score, 1);
        assert!(result.details[0].is_correct);
        assert_eq!(result.details[0].correct_answer, "B) y");

        let selected = vec![Some("A) x".to_string())];
        let result = verify_legacy(&questions, &selected);
        assert_eq!(result.score, 0);

        // Case-sensitive on the leading character
        let selected = vec![Some("b) y".to_string())];
        let result = verify_legacy(&questions, &selected);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_legacy_unanswered() {
        let questions = vec![LegacyQuestion {
            question: "Q1".to_string(),
            options: vec!["A) x".to_string(), "B) y".to_string()],
            answer: "A)".to_string(),
        }];

        let result = verify_legacy(&questions, &[None]);
        assert_eq!(result.score, 0);
        assert_eq!(result.details[0].user_answer, None);
        assert_eq!(result.details[0].explanation, NO_EXPLANATION);
    }
}
