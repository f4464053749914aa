//! Route definitions for the mux step and the download proxy.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{download, mux};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /mux        -> mux (403 unless ENABLE_MUX=1)
/// GET  /download   -> download (?url=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mux", post(mux::mux))
        .route("/download", get(download::download))
}
