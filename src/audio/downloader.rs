//! YouTube audio download via yt-dlp.

use crate::error::{QuizzleError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, instrument};

/// Downloads the audio track of a video URL and saves it as WAV.
///
/// Each run gets a fresh file name; the caller owns cleanup.
#[instrument(skip(output_dir, cookies_file), fields(url = %url))]
pub async fn download_audio(
    url: &str,
    output_dir: &Path,
    cookies_file: Option<&Path>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let stem = uuid::Uuid::new_v4().to_string();
    let target_path = output_dir.join(format!("{}.wav", stem));
    let template = output_dir.join(format!("{}.%(ext)s", stem));

    info!("Downloading audio from {}", url);

    let mut cmd = Command::new("yt-dlp");
    cmd.arg("--format").arg("bestaudio/best")
        .arg("--extract-audio")
        .arg("--audio-format").arg("wav")
        .arg("--audio-quality").arg("192")
        .arg("--output").arg(template.to_str().unwrap_or_default())
        .arg("--no-playlist")
        .arg("--quiet")
        .arg("--no-warnings");

    if let Some(cookies) = cookies_file {
        cmd.arg("--cookies").arg(cookies);
    }

    let result = cmd
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(QuizzleError::ToolNotFound("yt-dlp".into()));
        }
        Err(e) => {
            return Err(QuizzleError::AudioExtraction(format!(
                "yt-dlp execution failed: {e}"
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(QuizzleError::AudioExtraction(format!(
            "Failed to download video: {stderr}"
        )));
    }

    if target_path.exists() {
        return Ok(target_path);
    }

    // The post-processor normally leaves a .wav; fall back to whatever
    // extension yt-dlp produced.
    find_audio_file(output_dir, &stem)
}

/// Locates a downloaded audio file by its name stem.
fn find_audio_file(dir: &Path, stem: &str) -> Result<PathBuf> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| QuizzleError::AudioExtraction(format!("Cannot read directory: {e}")))?;

    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(stem) {
            return Ok(entry.path());
        }
    }

    Err(QuizzleError::AudioExtraction(
        "Audio file not found after download".into(),
    ))
}
