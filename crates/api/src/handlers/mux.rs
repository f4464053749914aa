//! Handler for the audio/video mux step.
//!
//! Downloads the two inputs to temp files, runs ffmpeg, and serves the
//! merged file from the static root. Disabled by default: the endpoint
//! answers 403 unless `ENABLE_MUX=1` and an ffmpeg binary is available.

use std::path::Path;

use axum::extract::State;
use axum::Json;
use clipgate_core::ffmpeg;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MuxRequest {
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
}

#[derive(Serialize)]
pub struct MuxResponse {
    /// URL of the merged file, under `/static/mux/`.
    pub merged_url: String,
}

/// POST /mux
pub async fn mux(
    State(state): State<AppState>,
    Json(request): Json<MuxRequest>,
) -> AppResult<Json<MuxResponse>> {
    if !state.config.enable_mux {
        return Err(AppError::Forbidden(
            "Mux disabled. Set ENABLE_MUX=1 with ffmpeg available.".into(),
        ));
    }

    let (video_url, audio_url) = match (&request.video_url, &request.audio_url) {
        (Some(v), Some(a)) if !v.is_empty() && !a.is_empty() => (v, a),
        _ => return Err(AppError::BadRequest("video_url and audio_url required".into())),
    };

    let tag = uuid::Uuid::new_v4().simple().to_string();
    let work_dir = std::env::temp_dir();
    let video_path = work_dir.join(format!("mux_{tag}_v.mp4"));
    let audio_path = work_dir.join(format!("mux_{tag}_a.mp3"));
    let output_name = format!("out_{tag}.mp4");
    let output_path = state.config.mux_dir().join(&output_name);

    let outcome = download_and_mux(
        &state,
        video_url,
        audio_url,
        &video_path,
        &audio_path,
        &output_path,
    )
    .await;

    // Temp inputs are removed whether or not the mux succeeded.
    let _ = tokio::fs::remove_file(&video_path).await;
    let _ = tokio::fs::remove_file(&audio_path).await;
    outcome?;

    tracing::info!(output = %output_path.display(), "mux complete");

    Ok(Json(MuxResponse {
        merged_url: format!("/static/mux/{output_name}"),
    }))
}

async fn download_and_mux(
    state: &AppState,
    video_url: &str,
    audio_url: &str,
    video_path: &Path,
    audio_path: &Path,
    output_path: &Path,
) -> AppResult<()> {
    download_to(state, video_url, video_path).await?;
    download_to(state, audio_url, audio_path).await?;

    ffmpeg::mux_video_audio(&state.config.ffmpeg_path, video_path, audio_path, output_path)
        .await?;
    Ok(())
}

/// Fetch a URL fully into a temp file.
async fn download_to(state: &AppState, url: &str, path: &Path) -> AppResult<()> {
    let response = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::BadGateway(format!("Download failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::BadGateway(format!(
            "Download failed with status {}",
            response.status(),
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::BadGateway(format!("Download failed: {e}")))?;

    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to write temp file: {e}")))
}
