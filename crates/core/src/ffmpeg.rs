//! FFmpeg invocation for the audio/video mux step.
//!
//! One operation: combine a downloaded video file and a downloaded audio
//! file into a single mp4, copying the video stream and re-encoding the
//! audio to AAC, truncated to the shorter input.

use std::ffi::OsString;
use std::path::Path;

/// Error type for ffmpeg operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("input file not found: {0}")]
    InputNotFound(String),
}

/// Build the ffmpeg argument list for a mux run.
///
/// `-shortest` truncates to the shorter of the two inputs so a long audio
/// track does not pad the video with a frozen last frame.
pub fn mux_args(video: &Path, audio: &Path, output: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-y"),
        OsString::from("-i"),
        video.as_os_str().to_os_string(),
        OsString::from("-i"),
        audio.as_os_str().to_os_string(),
        OsString::from("-c:v"),
        OsString::from("copy"),
        OsString::from("-c:a"),
        OsString::from("aac"),
        OsString::from("-shortest"),
        output.as_os_str().to_os_string(),
    ]
}

/// Mux `video` and `audio` into `output` using the ffmpeg binary at
/// `ffmpeg_path` (usually just `"ffmpeg"` on PATH).
pub async fn mux_video_audio(
    ffmpeg_path: &str,
    video: &Path,
    audio: &Path,
    output: &Path,
) -> Result<(), FfmpegError> {
    for input in [video, audio] {
        if !input.exists() {
            return Err(FfmpegError::InputNotFound(
                input.to_string_lossy().to_string(),
            ));
        }
    }

    let result = tokio::process::Command::new(ffmpeg_path)
        .args(mux_args(video, audio, output))
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !result.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).to_string(),
        });
    }

    tracing::debug!(output = %output.display(), "ffmpeg mux complete");
    Ok(())
}
