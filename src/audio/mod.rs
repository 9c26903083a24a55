//! Audio acquisition for Quizzle.
//!
//! Downloads audio from YouTube via yt-dlp and extracts audio tracks from
//! local video files via ffmpeg. All output is WAV, which Whisper accepts
//! directly.

mod downloader;
mod extractor;

pub use downloader::download_audio;
pub use extractor::{extract_audio, probe_duration, split_audio};

use crate::error::Result;
use crate::media::{LocalSource, MediaMetadata, SourceType};
use std::path::{Path, PathBuf};

/// Acquire a local WAV file for the given media.
///
/// YouTube sources are downloaded; local video files have their audio track
/// extracted; local audio files are used as-is.
pub async fn acquire_audio(
    media: &MediaMetadata,
    output_dir: &Path,
    cookies_file: Option<&Path>,
) -> Result<AcquiredAudio> {
    match media.source_type {
        SourceType::YouTube => {
            let path = download_audio(&media.source_url, output_dir, cookies_file).await?;
            Ok(AcquiredAudio { path, temporary: true })
        }
        SourceType::Local => {
            let source = Path::new(&media.source_url);
            if LocalSource::is_video_file(source) {
                let target = output_dir.join(format!("{}.wav", uuid::Uuid::new_v4()));
                let path = extract_audio(source, &target).await?;
                Ok(AcquiredAudio { path, temporary: true })
            } else {
                Ok(AcquiredAudio {
                    path: source.to_path_buf(),
                    temporary: false,
                })
            }
        }
    }
}

/// A local audio file ready for transcription.
///
/// `temporary` marks files the pipeline created and must delete after use.
#[derive(Debug)]
pub struct AcquiredAudio {
    pub path: PathBuf,
    pub temporary: bool,
}
