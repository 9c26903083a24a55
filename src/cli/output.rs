//! CLI output formatting utilities.

use crate::quiz::{QuizQuestion, VerificationResult};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a quiz question with lettered options.
    pub fn question(number: usize, question: &QuizQuestion) {
        println!(
            "\n{} {}",
            style(format!("Q{}:", number)).bold().cyan(),
            style(&question.question).bold()
        );
        for (i, option) in question.options.iter().enumerate() {
            let letter = (b'A' + i as u8) as char;
            println!("  {} {}", style(format!("{})", letter)).dim(), option);
        }
    }

    /// Print the per-question feedback and final score.
    pub fn report(result: &VerificationResult) {
        Output::header("Results");

        for (i, detail) in result.details.iter().enumerate() {
            let icon = if detail.is_correct {
                style("✓").green()
            } else {
                style("✗").red()
            };
            println!("\n  {} {} {}", icon, style(format!("Q{}:", i + 1)).bold(), detail.question);

            match &detail.user_answer {
                Some(answer) if detail.is_correct => {
                    println!("    Your answer: {}", style(answer).green());
                }
                Some(answer) => {
                    println!("    Your answer: {}", style(answer).red());
                    println!("    Correct answer: {}", style(&detail.correct_answer).green());
                }
                None => {
                    println!("    {}", style("No answer given").dim());
                    println!("    Correct answer: {}", style(&detail.correct_answer).green());
                }
            }

            println!("    {}", style(&detail.explanation).dim());
        }

        println!(
            "\n{} {} / {} ({}%)",
            style("Final score:").bold(),
            result.score,
            result.total,
            result.percentage
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
