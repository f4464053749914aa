//! Route definitions for the TTS pass-through.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tts;
use crate::state::AppState;

/// Routes mounted at `/eleven`.
///
/// ```text
/// GET  /eleven/voices      -> list_voices
/// POST /eleven/tts         -> synthesize (save + URL)
/// POST /eleven/tts/stream  -> synthesize_stream (raw audio/mpeg)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/eleven/voices", get(tts::list_voices))
        .route("/eleven/tts", post(tts::synthesize))
        .route("/eleven/tts/stream", post(tts::synthesize_stream))
}
