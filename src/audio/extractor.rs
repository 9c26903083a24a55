//! Audio extraction and splitting via ffmpeg/ffprobe.

use crate::error::{QuizzleError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Extracts the audio track of a video file as 16-bit stereo WAV at 44.1kHz.
#[instrument(skip_all, fields(video = %video_path.display()))]
pub async fn extract_audio(video_path: &Path, audio_path: &Path) -> Result<PathBuf> {
    if let Some(parent) = audio_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    debug!("Extracting audio to {:?}", audio_path);

    let result = Command::new("ffmpeg")
        .arg("-i").arg(video_path)
        .arg("-vn")
        .arg("-acodec").arg("pcm_s16le")
        .arg("-ar").arg("44100")
        .arg("-ac").arg("2")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(audio_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => Ok(audio_path.to_path_buf()),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(QuizzleError::AudioExtraction(format!(
                "ffmpeg extraction failed: {err}"
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(QuizzleError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(QuizzleError::AudioExtraction(format!("ffmpeg error: {e}"))),
    }
}

/// Segments a long audio file into smaller chunks for transcription.
///
/// Each chunk will be approximately `chunk_seconds` long. Returns the chunk
/// paths in playback order.
#[instrument(skip_all)]
pub async fn split_audio(
    source: &Path,
    output_dir: &Path,
    chunk_seconds: u32,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let total_duration = probe_duration(source).await?;
    info!("Total audio duration: {:.1}s", total_duration);

    let chunk_len = chunk_seconds as f64;

    // Short audio doesn't need splitting
    if total_duration <= chunk_len {
        return Ok(vec![source.to_path_buf()]);
    }

    let base_name = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");

    let mut segments = Vec::new();
    let mut offset = 0.0;
    let mut idx = 0u32;

    while offset < total_duration {
        let segment_path = output_dir.join(format!("{}_{:04}.wav", base_name, idx));
        let segment_len = chunk_len.min(total_duration - offset);

        extract_segment(source, &segment_path, offset, segment_len).await?;

        debug!("Created segment {} at offset {:.1}s", idx, offset);
        segments.push(segment_path);

        offset += chunk_len;
        idx += 1;
    }

    info!("Created {} audio segments", segments.len());
    Ok(segments)
}

/// Extracts a time segment from an audio file.
async fn extract_segment(source: &Path, dest: &Path, start: f64, length: f64) -> Result<()> {
    let result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-acodec").arg("pcm_s16le")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(QuizzleError::AudioExtraction(format!(
                "Segment extraction failed: {err}"
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(QuizzleError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(QuizzleError::AudioExtraction(format!("ffmpeg error: {e}"))),
    }
}

/// Queries the duration of an audio file using ffprobe with JSON output.
pub async fn probe_duration(path: &Path) -> Result<f64> {
    let result = Command::new("ffprobe")
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-show_format")
        .arg(path)
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(QuizzleError::ToolNotFound("ffprobe".into()));
        }
        Err(e) => {
            return Err(QuizzleError::AudioExtraction(format!("ffprobe failed: {e}")));
        }
    };

    if !output.status.success() {
        return Err(QuizzleError::AudioExtraction("ffprobe returned error".into()));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|_| QuizzleError::AudioExtraction("Invalid ffprobe output".into()))?;

    parsed["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| QuizzleError::AudioExtraction("Could not determine audio duration".into()))
}
