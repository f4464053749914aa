//! Handler for polling a job by identifier.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use clipgate_core::{extract, ProviderJob};
use clipgate_providers::{ProviderError, VideoProvider};
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::{select_provider, ProviderSelect};
use crate::response::GenerationResponse;
use crate::state::AppState;

/// GET /result/{job_id}
///
/// One immediate resolution pass, no sleeps: the caller owns the retry
/// cadence here, so each request maps to at most one round of provider
/// fetches. The cache short-circuits jobs that already resolved (from an
/// earlier call or a background poll); an identifier that resolves now is
/// cached for the next caller.
pub async fn poll_result(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(select): Query<ProviderSelect>,
) -> AppResult<impl IntoResponse> {
    let kind = select_provider(&select, None, state.config.default_provider)?;
    let provider = state.provider(kind);

    if !provider.has_credentials() {
        return Err(ProviderError::AuthMissing {
            provider: kind.as_str(),
        }
        .into());
    }

    if let Some(url) = state.cache.get(&job_id).await {
        return Ok(GenerationResponse::cached(kind, job_id, url));
    }

    let job = match provider.fetch_result(&job_id).await? {
        Some(payload) => match extract::find_video_url(&payload) {
            Some(url) => {
                state.cache.insert(&job_id, &url).await;
                ProviderJob::resolved(Some(job_id), url, payload)
            }
            None => ProviderJob::pending(Some(job_id), payload),
        },
        None => ProviderJob::pending(Some(job_id), Value::Null),
    };

    Ok(GenerationResponse::from_job(kind, job))
}
