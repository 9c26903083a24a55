//! Local file source implementation.
//!
//! Supports both audio and video files; video files have audio extracted
//! later in the pipeline.

use super::{MediaMetadata, MediaSource, SourceType};
use crate::error::{QuizzleError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "opus", "m4a", "wma", "aiff",
];

/// Supported video file extensions (audio will be extracted).
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "m4v", "mpeg", "mpg",
];

/// Local file source for audio and video files.
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }

    /// Check if path is a supported audio file.
    pub fn is_audio_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Check if path is a supported video file.
    pub fn is_video_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Check if path is a supported media file (audio or video).
    fn is_media_file(path: &Path) -> bool {
        Self::is_audio_file(path) || Self::is_video_file(path)
    }

    /// Get media duration and title using ffprobe.
    async fn get_metadata_ffprobe(path: &Path) -> Result<(Option<u32>, Option<String>)> {
        let output = tokio::process::Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                path.to_str().unwrap_or(""),
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    QuizzleError::ToolNotFound("ffprobe".to_string())
                } else {
                    QuizzleError::MediaSource(format!("Failed to run ffprobe: {}", e))
                }
            })?;

        if !output.status.success() {
            // ffprobe failed, but we can still proceed without metadata
            return Ok((None, None));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str).unwrap_or_default();

        let duration = json["format"]["duration"]
            .as_str()
            .and_then(|d| d.parse::<f64>().ok())
            .map(|d| d as u32);

        let title = json["format"]["tags"]["title"]
            .as_str()
            .map(|s| s.to_string());

        Ok((duration, title))
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaSource for LocalSource {
    fn source_type(&self) -> SourceType {
        SourceType::Local
    }

    async fn fetch_media(&self, id: &str) -> Result<MediaMetadata> {
        let path = Path::new(id);

        if !path.exists() {
            return Err(QuizzleError::MediaNotFound(format!("File not found: {}", id)));
        }

        if !Self::is_media_file(path) {
            return Err(QuizzleError::InvalidInput(format!(
                "Not a recognized audio or video file: {}",
                id
            )));
        }

        let (duration, metadata_title) = Self::get_metadata_ffprobe(path).await?;

        let title = metadata_title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Unknown")
                .to_string()
        });

        // Generate a stable ID from the file path
        let media_id = format!(
            "local_{}",
            path.canonicalize()
                .unwrap_or_else(|_| path.to_path_buf())
                .to_string_lossy()
                .replace(['/', '\\', ' '], "_")
        );

        Ok(MediaMetadata {
            id: media_id,
            title,
            duration_seconds: duration,
            source_type: SourceType::Local,
            source_url: path
                .canonicalize()
                .unwrap_or_else(|_| path.to_path_buf())
                .to_string_lossy()
                .to_string(),
        })
    }

    fn can_handle(&self, input: &str) -> bool {
        let path = Path::new(input);
        path.exists() && Self::is_media_file(path)
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        if self.can_handle(input) {
            Some(input.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_audio_file() {
        assert!(LocalSource::is_audio_file(Path::new("audio.mp3")));
        assert!(LocalSource::is_audio_file(Path::new("audio.WAV")));
        assert!(!LocalSource::is_audio_file(Path::new("video.mp4")));
        assert!(!LocalSource::is_audio_file(Path::new("document.pdf")));
    }

    #[test]
    fn test_is_video_file() {
        assert!(LocalSource::is_video_file(Path::new("video.mp4")));
        assert!(LocalSource::is_video_file(Path::new("video.MKV")));
        assert!(!LocalSource::is_video_file(Path::new("audio.mp3")));
    }
}
