use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub ts: chrono::DateTime<chrono::Utc>,
    pub default_provider: &'static str,
}

/// GET /health -- liveness plus the configured default provider.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        ts: chrono::Utc::now(),
        default_provider: state.config.default_provider.as_str(),
    })
}

/// Mount health check routes (root-level).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
