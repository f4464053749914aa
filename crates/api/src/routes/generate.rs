//! Route definitions for submission, polling, and diagnosis.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{diag, generate, result};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /diag               -> diag
/// POST /generate           -> generate_fast
/// POST /generate-fast      -> generate_fast
/// POST /generate-quality   -> generate_quality
/// GET  /result/{job_id}    -> poll_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/diag", get(diag::diag))
        .route("/generate", post(generate::generate_fast))
        .route("/generate-fast", post(generate::generate_fast))
        .route("/generate-quality", post(generate::generate_quality))
        .route("/result/{job_id}", get(result::poll_result))
}
