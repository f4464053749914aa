//! Handlers for the text-to-speech pass-through.
//!
//! Two synthesis shapes: save-and-link (an MP3 written under the static
//! root, answered with its URL) for callers that want a replayable file,
//! and a raw `audio/mpeg` stream for immediate playback.

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use axum::Json;
use clipgate_providers::eleven::{Voice, VoiceSettings};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<Voice>,
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub voice_id: Option<String>,
    pub text: Option<String>,
    pub model_id: Option<String>,
    /// Optional synthesis parameter overrides.
    pub params: Option<VoiceSettings>,
}

#[derive(Serialize)]
pub struct TtsResponse {
    /// URL of the saved MP3, under `/static/tts/`.
    pub audio_url: String,
    pub bytes: usize,
}

/// GET /eleven/voices
pub async fn list_voices(State(state): State<AppState>) -> AppResult<Json<VoicesResponse>> {
    let voices = state.eleven.voices().await?;
    Ok(Json(VoicesResponse { voices }))
}

/// POST /eleven/tts -- synthesize and save, answering with a URL.
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> AppResult<Json<TtsResponse>> {
    let (voice_id, text) = validate(&request)?;
    let settings = request.params.clone().unwrap_or_default();

    let audio = state
        .eleven
        .synthesize(voice_id, text, request.model_id.as_deref(), &settings)
        .await?;

    let filename = format!("tts_{}.mp3", uuid::Uuid::new_v4().simple());
    let path = state.config.tts_dir().join(&filename);
    tokio::fs::write(&path, &audio)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to save audio: {e}")))?;

    tracing::info!(file = %path.display(), bytes = audio.len(), "saved tts output");

    Ok(Json(TtsResponse {
        audio_url: format!("/static/tts/{filename}"),
        bytes: audio.len(),
    }))
}

/// POST /eleven/tts/stream -- synthesize and stream the MP3 bytes through.
pub async fn synthesize_stream(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> AppResult<Response> {
    let (voice_id, text) = validate(&request)?;
    let settings = request.params.clone().unwrap_or_default();

    let upstream = state
        .eleven
        .synthesize_stream(voice_id, text, request.model_id.as_deref(), &settings)
        .await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

fn validate(request: &TtsRequest) -> Result<(&str, &str), AppError> {
    match (request.voice_id.as_deref(), request.text.as_deref()) {
        (Some(voice_id), Some(text)) if !voice_id.is_empty() && !text.is_empty() => {
            Ok((voice_id, text))
        }
        _ => Err(AppError::BadRequest("voice_id and text required".into())),
    }
}
