pub mod generate;
pub mod health;
pub mod media;
pub mod tts;

use axum::Router;

use crate::state::AppState;

/// Build the root route tree (the front end calls these paths directly,
/// so there is no version prefix).
///
/// ```text
/// GET  /health                 liveness
/// GET  /diag                   config diagnosis
///
/// POST /generate               submit, fast tier
/// POST /generate-fast          submit, fast tier (explicit alias)
/// POST /generate-quality       submit, quality tier
/// GET  /result/{job_id}        poll by identifier (?provider=)
///
/// GET  /eleven/voices          list TTS voices
/// POST /eleven/tts             synthesize, save, answer with URL
/// POST /eleven/tts/stream      synthesize, stream audio/mpeg
///
/// POST /mux                    merge video + audio via ffmpeg
/// GET  /download               byte-range-aware attachment proxy (?url=)
///
/// /static/*                    served separately (see `app::build_app`)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(generate::router())
        .merge(tts::router())
        .merge(media::router())
}
