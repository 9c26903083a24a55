//! Quiz command - run the full pipeline and take the quiz in the terminal.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::pipeline::QuizPipeline;
use crate::quiz::{verifier, Quiz, UserAnswers};
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the quiz command.
pub async fn run_quiz(
    input: &str,
    target_lang: Option<&str>,
    difficulty: Option<&str>,
    output: Option<String>,
    show_transcript: bool,
    settings: Settings,
) -> Result<()> {
    preflight::check(preflight::Operation::GenerateQuiz)?;

    // Flags override the configured defaults
    let target_lang = target_lang
        .unwrap_or(&settings.translation.target_lang)
        .to_string();
    let difficulty = difficulty.unwrap_or(&settings.quiz.difficulty).to_string();

    let pipeline = QuizPipeline::new(settings)?;

    Output::header("Quizzle");
    Output::info(&format!("Processing: {}", input));

    let result = pipeline.run(input, &target_lang, &difficulty).await?;

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)?;
        Output::success(&format!("Wrote quiz to {}", path));
        return Ok(());
    }

    if show_transcript {
        Output::header("Transcript");
        println!("{}", result.transcript);
    }

    Output::header("Summary");
    println!("{}", result.summary);

    if result.quiz.is_empty() {
        Output::warning("The model did not return a usable quiz. Try again.");
        return Ok(());
    }

    if result.quiz.dropped_blocks > 0 {
        Output::warning(&format!(
            "{} malformed question(s) were dropped; quiz has {} question(s).",
            result.quiz.dropped_blocks,
            result.quiz.len()
        ));
    }

    let answers = collect_answers(&result.quiz)?;
    let verification = verifier::verify(&result.quiz, &answers);
    Output::report(&verification);

    Ok(())
}

/// Present each question and collect the user's answers.
///
/// Answers accumulate until every question has been shown; verification
/// happens exactly once afterwards.
fn collect_answers(quiz: &Quiz) -> Result<UserAnswers> {
    Output::header("Take the Quiz");
    println!(
        "{}",
        style("Answer with a letter (A, B, ...) or press Enter to skip.").dim()
    );

    let stdin = io::stdin();
    let mut answers = UserAnswers::new();

    for (i, question) in quiz.questions.iter().enumerate() {
        Output::question(i + 1, question);

        loop {
            print!("{} ", style("Your answer:").bold());
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF: treat remaining questions as unanswered
                return Ok(answers);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                break; // skipped
            }

            match parse_choice(trimmed, question.options.len()) {
                Some(choice) => {
                    answers.insert(i, choice);
                    break;
                }
                None => {
                    Output::warning(&format!(
                        "Please answer with a letter between A and {}.",
                        (b'A' + (question.options.len() as u8).saturating_sub(1)) as char
                    ));
                }
            }
        }
    }

    Ok(answers)
}

/// Parse a letter (or 1-based number) into an option index.
fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let first = input.chars().next()?;

    let index = if first.is_ascii_alphabetic() {
        (first.to_ascii_uppercase() as u8 - b'A') as usize
    } else if first.is_ascii_digit() {
        (first as u8 - b'0').checked_sub(1)? as usize
    } else {
        return None;
    };

    (index < option_count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("A", 4), Some(0));
        assert_eq!(parse_choice("b", 4), Some(1));
        assert_eq!(parse_choice("D) something", 4), Some(3));
        assert_eq!(parse_choice("2", 4), Some(1));
        assert_eq!(parse_choice("E", 4), None);
        assert_eq!(parse_choice("0", 4), None);
        assert_eq!(parse_choice("?", 4), None);
    }
}
