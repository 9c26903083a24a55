//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::error::{QuizzleError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Quiz generation requires external tools and an API key.
    GenerateQuiz,
    /// Serving requires the same set; checked once at startup.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::GenerateQuiz | Operation::Serve => {
            check_api_key()?;
            check_tool("yt-dlp")?;
            check_tool("ffmpeg")?;
            check_tool("ffprobe")?;
        }
    }
    Ok(())
}

/// Check if an LLM API key is configured.
fn check_api_key() -> Result<()> {
    if crate::llm::is_api_key_configured() {
        Ok(())
    } else {
        Err(QuizzleError::Config(
            "No API key set. Set one with: export GROQ_API_KEY='gsk-...' (or OPENAI_API_KEY)"
                .to_string(),
        ))
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg/ffprobe use -version (single dash), others use --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(QuizzleError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(QuizzleError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(QuizzleError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
