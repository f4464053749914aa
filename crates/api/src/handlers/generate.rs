//! Handlers for the submission endpoints.
//!
//! Submission blocks for the provider call plus a short inline poll, then
//! answers 200 with a URL, 202 with a job identifier (or without one, in
//! the ambiguous case), or the provider's own failure status. When a job
//! stays pending a fire-and-forget background poll is spawned so a later
//! `/result/{id}` call can be answered from the cache.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use clipgate_core::{GenerationRequest, ModelTier};
use clipgate_providers::{poller, PollConfig, VideoProvider};

use crate::error::AppResult;
use crate::handlers::{select_provider, ProviderSelect};
use crate::response::GenerationResponse;
use crate::state::AppState;

/// POST /generate and /generate-fast
pub async fn generate_fast(
    State(state): State<AppState>,
    Query(select): Query<ProviderSelect>,
    Json(request): Json<GenerationRequest>,
) -> AppResult<impl IntoResponse> {
    submit(state, select, request, ModelTier::Fast).await
}

/// POST /generate-quality
pub async fn generate_quality(
    State(state): State<AppState>,
    Query(select): Query<ProviderSelect>,
    Json(request): Json<GenerationRequest>,
) -> AppResult<impl IntoResponse> {
    submit(state, select, request, ModelTier::Quality).await
}

async fn submit(
    state: AppState,
    select: ProviderSelect,
    request: GenerationRequest,
    tier: ModelTier,
) -> AppResult<impl IntoResponse> {
    let kind = select_provider(&select, request.provider.as_deref(), state.config.default_provider)?;
    let provider = state.provider(kind);

    let job = provider.submit(&request, tier).await?;

    if let (Some(id), Some(url)) = (&job.identifier, &job.result_url) {
        state.cache.insert(id, url).await;
    }

    // Accepted but unresolved: keep polling in the background so repeat
    // polls by identifier can short-circuit on the cache.
    if job.is_pending() {
        if let Some(id) = &job.identifier {
            poller::spawn_background(
                provider,
                id.clone(),
                Arc::clone(&state.cache),
                PollConfig::default(),
            );
        }
    }

    Ok(GenerationResponse::from_job(kind, job))
}
